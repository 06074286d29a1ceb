//! Dossier Core Library
//!
//! Lead-capture processing for the Playa Viva landing page: forwards each
//! lead to HubSpot for attribution and produces a personalized copy of the
//! dossier PDF.

pub mod config;
pub mod clients;
pub mod services;
pub mod workflow;
pub mod types;
pub mod error;
pub mod paths;

// Re-export main types for easy access
pub use config::DossierConfig;
pub use error::{DossierError, Result};
pub use dossier_types::{LeadSubmission, SubmissionResult};

// Re-export all client types
pub use clients::{
    HubSpotClient,
    PdfPersonalizer,
};

// Re-export service types
pub use services::LeadProcessor;

// Re-export workflow types
pub use workflow::{
    SubmissionOrchestrator,
    SubmissionSteps,
};

pub use types::{
    AttributionRecord,
    PersonalizationOutcome,
    PersonalizedDocument,
    QualifiedLead,
};
