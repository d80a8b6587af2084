//! Data models for ai-inventory

pub mod metadata;
pub mod record;

pub use metadata::Metadata;
pub use record::{is_present_status, UseCaseRecord};
