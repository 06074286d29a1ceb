//! Shared wire types for the dossier lead-capture flow

use serde::{Deserialize, Serialize};

/// Lead-capture submission as posted by the landing page
///
/// Missing keys deserialize to empty strings so that an incomplete payload is
/// reported by validation rather than rejected as malformed JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(rename = "fullname", default)]
    pub full_name: String,

    #[serde(default)]
    pub email: String,

    /// HubSpot tracking cookie value
    #[serde(rename = "hubspotutk", default)]
    pub attribution_token: String,

    #[serde(rename = "pageUri", default, skip_serializing_if = "Option::is_none")]
    pub source_page_uri: Option<String>,
}

impl LeadSubmission {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>, attribution_token: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            attribution_token: attribution_token.into(),
            source_page_uri: None,
        }
    }

    pub fn with_page_uri(mut self, page_uri: impl Into<String>) -> Self {
        self.source_page_uri = Some(page_uri.into());
        self
    }

    /// Parse a submission payload. Fails only when the payload is not a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Aggregate outcome of one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub success: bool,
    pub attribution_success: bool,
    pub document_success: bool,
    pub document_path: Option<String>,
    pub document_delivery_url: Option<String>,
    pub message: String,
}

impl SubmissionResult {
    /// A submission stopped before any side effect ran
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            attribution_success: false,
            document_success: false,
            document_path: None,
            document_delivery_url: None,
            message: message.into(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
