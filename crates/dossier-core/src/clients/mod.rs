//! Client modules for external collaborators

pub mod hubspot;
pub mod pdf;

// Re-export all client types
pub use hubspot::HubSpotClient;
pub use pdf::PdfPersonalizer;
