//! Lead processing service wiring the real collaborators

use crate::clients::{HubSpotClient, PdfPersonalizer};
use crate::config::DossierConfig;
use crate::error::{DossierError, Result};
use crate::types::{PersonalizationOutcome, QualifiedLead};
use crate::workflow::SubmissionSteps;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub struct LeadProcessor {
    hubspot_client: Arc<HubSpotClient>,
    personalizer: Arc<PdfPersonalizer>,
    template_path: PathBuf,
    output_dir: PathBuf,
}

impl LeadProcessor {
    pub fn new(
        hubspot_client: Arc<HubSpotClient>,
        personalizer: Arc<PdfPersonalizer>,
        template_path: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            hubspot_client,
            personalizer,
            template_path,
            output_dir,
        }
    }

    /// Build the processor and its clients from configuration
    pub fn from_config(config: &DossierConfig) -> Result<Self> {
        let hubspot_client = Arc::new(HubSpotClient::new(config.hubspot.clone())?);
        let personalizer = Arc::new(PdfPersonalizer::new(&config.document));
        let output_dir = config.document.resolved_output_dir();

        log::info!("Template: {}", config.document.template_path.display());
        log::info!("Output directory: {}", output_dir.display());

        Ok(Self::new(
            hubspot_client,
            personalizer,
            config.document.template_path.clone(),
            output_dir,
        ))
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}

#[async_trait]
impl SubmissionSteps for LeadProcessor {
    fn check_template(&self) -> Result<()> {
        if !self.template_path.is_file() {
            return Err(DossierError::Config(format!(
                "Template PDF not found: {}",
                self.template_path.display()
            )));
        }
        Ok(())
    }

    async fn submit_attribution(&self, lead: &QualifiedLead) -> bool {
        let record = self.hubspot_client.build_record(lead);
        self.hubspot_client.submit(&record).await
    }

    async fn personalize_document(&self, full_name: &str) -> PersonalizationOutcome {
        let personalizer = Arc::clone(&self.personalizer);
        let full_name = full_name.to_string();
        let output_dir = self.output_dir.clone();
        let template_path = self.template_path.clone();

        // lopdf is synchronous; keep it off the async workers
        tokio::task::spawn_blocking(move || personalizer.personalize(&full_name, &output_dir, &template_path))
            .await
            .unwrap_or_else(|e| {
                log::error!("PDF personalization task failed: {}", e);
                PersonalizationOutcome::failed(format!("Personalization task failed: {}", e))
            })
    }

    async fn notify_document_ready(&self, email: &str, delivery_url: &str) {
        log::info!("Email processed for {} with download link {}", email, delivery_url);
    }

    async fn notify_template_missing(&self, lead: &QualifiedLead) {
        log::warn!(
            "Dossier alert: lead {} <{}> requested a dossier but the template is missing at {}",
            lead.full_name,
            lead.email,
            self.template_path.display()
        );
    }
}
