//! HubSpot forms client for lead attribution

use crate::config::HubSpotConfig;
use crate::error::{DossierError, Result};
use crate::types::{AttributionRecord, QualifiedLead};
use reqwest::Client as HttpClient;

pub struct HubSpotClient {
    config: HubSpotConfig,
    endpoint: String,
    http_client: HttpClient,
}

impl HubSpotClient {
    pub fn new(config: HubSpotConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DossierError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/submissions/v3/integration/submit/{}/{}",
            config.api_base_url.trim_end_matches('/'),
            config.portal_id,
            config.form_guid
        );
        log::info!("HubSpotClient configured for endpoint: {}", endpoint);

        Ok(Self {
            config,
            endpoint,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the attribution record for a validated lead
    pub fn build_record(&self, lead: &QualifiedLead) -> AttributionRecord {
        let (name, last_name) = AttributionRecord::split_name(&lead.full_name);

        let source_page_uri = lead.source_page_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .unwrap_or(&self.config.default_page_uri)
            .to_string();

        AttributionRecord {
            name,
            last_name,
            email: lead.email.clone(),
            market: self.config.market.clone(),
            partner_source: self.config.partner_source.clone(),
            attribution_token: lead.attribution_token.clone(),
            source_page_uri,
            page_name: self.config.page_name.clone(),
        }
    }

    /// Submit a lead once. Any transport error or non-2xx status yields `false`.
    pub async fn submit(&self, record: &AttributionRecord) -> bool {
        match self.try_submit(record).await {
            Ok(()) => {
                log::info!("Lead {} sent to HubSpot", record.email);
                true
            }
            Err(e) => {
                log::error!("Error sending lead {} to HubSpot: {}", record.email, e);
                false
            }
        }
    }

    async fn try_submit(&self, record: &AttributionRecord) -> Result<()> {
        let response = self.http_client
            .post(&self.endpoint)
            .json(&record.to_submission())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DossierError::Attribution(
                format!("HubSpot returned {} - {}", status, error_text)
            ));
        }

        Ok(())
    }
}
