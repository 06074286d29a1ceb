//! Submission orchestrator running both side effects independently

use super::traits::SubmissionSteps;
use crate::error::DossierError;
use crate::types::QualifiedLead;
use chrono::Utc;
use dossier_types::{LeadSubmission, SubmissionResult};

const FALLBACK_TOKEN_PREFIX: &str = "generated_";
const TEMPLATE_UNAVAILABLE_MESSAGE: &str =
    "The personalized dossier is temporarily unavailable, please try again in a few minutes";

/// Single orchestration component for lead submissions
pub struct SubmissionOrchestrator<T: SubmissionSteps> {
    steps: T,
}

impl<T: SubmissionSteps> SubmissionOrchestrator<T> {
    pub fn new(steps: T) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &T {
        &self.steps
    }

    /// Process one submission. Never fails: every error ends up in the result.
    pub async fn process(&self, submission: LeadSubmission) -> SubmissionResult {
        let lead = match qualify(submission) {
            Ok(lead) => lead,
            Err(e) => {
                log::warn!("Rejected submission: {}", e);
                return SubmissionResult::rejected(e.to_string());
            }
        };

        if let Err(e) = self.steps.check_template() {
            log::error!("Cannot process lead {}: {}", lead.email, e);
            self.steps.notify_template_missing(&lead).await;
            return SubmissionResult::rejected(format!("{} ({})", TEMPLATE_UNAVAILABLE_MESSAGE, e));
        }

        log::info!("Processing lead {} <{}>", lead.full_name, lead.email);

        // Independent side effects: neither outcome influences the other
        let (attribution_success, document) = tokio::join!(
            self.steps.submit_attribution(&lead),
            self.steps.personalize_document(&lead.full_name),
        );

        if let (true, Some(url)) = (document.success, document.delivery_url.as_deref()) {
            self.steps.notify_document_ready(&lead.email, url).await;
        }

        let message = summarize(attribution_success, document.success, document.diagnostic.as_deref());
        let success = attribution_success && document.success;

        if success {
            log::info!("Lead {} processed: {}", lead.email, message);
        } else {
            log::warn!("Lead {} processed with errors: {}", lead.email, message);
        }

        SubmissionResult {
            success,
            attribution_success,
            document_success: document.success,
            document_path: document.success
                .then(|| document.path.as_ref().map(|p| p.display().to_string()))
                .flatten(),
            document_delivery_url: document.success
                .then_some(document.delivery_url)
                .flatten(),
            message,
        }
    }
}

/// Validate and normalize a raw submission
fn qualify(submission: LeadSubmission) -> Result<QualifiedLead, DossierError> {
    let full_name = submission.full_name.trim().to_string();
    let email = submission.email.trim().to_string();

    if full_name.is_empty() || email.is_empty() {
        return Err(DossierError::Validation(
            "Missing required fields (fullname, email)".to_string()
        ));
    }

    let attribution_token = match submission.attribution_token.trim() {
        "" => {
            let token = fallback_token();
            log::warn!("No hubspotutk provided. Using fallback: {}", token);
            token
        }
        token => token.to_string(),
    };

    Ok(QualifiedLead {
        full_name,
        email,
        attribution_token,
        source_page_uri: submission.source_page_uri,
    })
}

fn fallback_token() -> String {
    format!("{}{}", FALLBACK_TOKEN_PREFIX, Utc::now().timestamp_millis())
}

fn summarize(attribution_success: bool, document_success: bool, diagnostic: Option<&str>) -> String {
    let mut failures = Vec::new();

    if !attribution_success {
        failures.push("attribution submission failed".to_string());
    }
    if !document_success {
        failures.push(format!(
            "document personalization failed: {}",
            diagnostic.unwrap_or("unknown error")
        ));
    }

    if !failures.is_empty() {
        return format!("Completed with errors: {}", failures.join("; "));
    }

    match diagnostic {
        Some(warning) => format!("Dossier personalized and lead sent to HubSpot (warning: {})", warning),
        None => "Dossier personalized and lead sent to HubSpot".to_string(),
    }
}
