//! Submission step traits for the lead-capture orchestration

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{PersonalizationOutcome, QualifiedLead};

/// The side effects of a lead submission
///
/// Each step reports its own outcome; none of them return errors that could
/// abort a sibling step.
#[async_trait]
pub trait SubmissionSteps: Send + Sync {
    /// Pre-flight: the template document must exist
    fn check_template(&self) -> Result<()>;

    /// Forward the lead to the marketing API. Single attempt.
    async fn submit_attribution(&self, lead: &QualifiedLead) -> bool;

    /// Write the personalized dossier for `full_name`
    async fn personalize_document(&self, full_name: &str) -> PersonalizationOutcome;

    /// Announce that a dossier is ready for `email`. Delivery is not wired up.
    async fn notify_document_ready(&self, email: &str, delivery_url: &str);

    /// Alert the operator that a lead arrived while the template was missing
    async fn notify_template_missing(&self, lead: &QualifiedLead);
}
