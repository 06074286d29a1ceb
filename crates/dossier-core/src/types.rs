//! Common types used throughout the dossier system

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A submission that passed validation, with trimmed fields and a
/// guaranteed attribution token
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedLead {
    pub full_name: String,
    pub email: String,
    pub attribution_token: String,
    pub source_page_uri: Option<String>,
}

/// Lead record forwarded to the marketing API
#[derive(Debug, Clone, PartialEq)]
pub struct AttributionRecord {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub market: String,
    pub partner_source: String,
    pub attribution_token: String,
    pub source_page_uri: String,
    pub page_name: String,
}

impl AttributionRecord {
    /// Split a full name into first token and the remaining tokens
    pub fn split_name(full_name: &str) -> (String, String) {
        let mut tokens = full_name.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_string();
        let last_name = tokens.collect::<Vec<_>>().join(" ");
        (name, last_name)
    }

    /// Wire payload for the HubSpot forms integration API
    pub fn to_submission(&self) -> HubSpotSubmission {
        HubSpotSubmission {
            fields: vec![
                FormField::new(HubSpotFields::EMAIL, &self.email),
                FormField::new(HubSpotFields::FIRST_NAME, &self.name),
                FormField::new(HubSpotFields::LAST_NAME, &self.last_name),
                FormField::new(HubSpotFields::MARKET, &self.market),
                FormField::new(HubSpotFields::PARTNER_SOURCE, &self.partner_source),
            ],
            context: SubmissionContext {
                hutk: self.attribution_token.clone(),
                page_uri: self.source_page_uri.clone(),
                page_name: self.page_name.clone(),
            },
        }
    }
}

/// HubSpot form field names
pub struct HubSpotFields;

impl HubSpotFields {
    pub const EMAIL: &'static str = "email";
    pub const FIRST_NAME: &'static str = "firstname";
    pub const LAST_NAME: &'static str = "lastname";
    pub const MARKET: &'static str = "mercado_de_origen";
    pub const PARTNER_SOURCE: &'static str = "lead_partner_source";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSpotSubmission {
    pub fields: Vec<FormField>,
    pub context: SubmissionContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionContext {
    pub hutk: String,
    #[serde(rename = "pageUri")]
    pub page_uri: String,
    #[serde(rename = "pageName")]
    pub page_name: String,
}

/// A personalized dossier written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalizedDocument {
    pub path: PathBuf,
    pub file_name: String,
    pub delivery_url: String,
    pub page_count: usize,
    pub field_filled: bool,
}

/// Result of one personalization attempt
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonalizationOutcome {
    pub success: bool,
    pub path: Option<PathBuf>,
    pub delivery_url: Option<String>,
    /// Underlying cause on failure, or a warning such as a missing form field
    pub diagnostic: Option<String>,
}

impl PersonalizationOutcome {
    pub fn completed(document: &PersonalizedDocument, diagnostic: Option<String>) -> Self {
        Self {
            success: true,
            path: Some(document.path.clone()),
            delivery_url: Some(document.delivery_url.clone()),
            diagnostic,
        }
    }

    pub fn failed(cause: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            delivery_url: None,
            diagnostic: Some(cause.into()),
        }
    }
}
