//! Submission workflow module

pub mod traits;
pub mod orchestrator;

pub use traits::SubmissionSteps;
pub use orchestrator::SubmissionOrchestrator;
