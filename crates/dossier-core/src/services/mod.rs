//! Service modules for business logic

pub mod lead_processor;

// Re-export service types
pub use lead_processor::LeadProcessor;
