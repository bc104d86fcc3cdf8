//! tfusage library
//!
//! Rule-based usage assumptions for Terraform cost estimation. The core is
//! [`usage::generate_usage`], which pairs resources with free-text answers
//! and resolves each answer into numeric monthly usage.

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod output;
pub mod resource;
pub mod templates;
pub mod usage;
pub mod validation;

// Re-export commonly used types
pub use resource::Resource;
pub use usage::{generate_usage, UsageEngine, UsageRecord};
