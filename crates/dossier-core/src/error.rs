//! Error types for the dossier system

use thiserror::Error;

/// Main error type for all dossier operations
#[derive(Error, Debug)]
pub enum DossierError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Attribution submission failed: {0}")]
    Attribution(String),

    #[error("Document error: {0}")]
    DocumentIo(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type for dossier operations
pub type Result<T> = std::result::Result<T, DossierError>;
