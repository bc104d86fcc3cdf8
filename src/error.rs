//! Error types for tfusage
//!
//! This module defines the error handling strategy for tfusage. There are two
//! error types: `UsageError` (main error enum) and `ConfigError` (configuration-specific).
//!
//! ## Error Handling Philosophy
//!
//! Library code uses `crate::error::Result<T>` which returns `UsageError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling. The conversion
//! happens at the CLI boundary using `anyhow::Error::from` to preserve error chains.
//!
//! The usage engine itself never returns an error: ambiguous or malformed answers
//! degrade to defaults. Errors only come from the boundary (loading resources,
//! reading config, managing templates on disk).
//!
//! ## When to Use Which Error
//!
//! - `ConfigError`: Configuration parsing and validation issues
//!   - Automatically converted to `UsageError::Config` via `#[from]`
//!
//! - `InvalidResources`: Resource documents that cannot be interpreted
//!   - Use when a breakdown document has no projects or no breakdown
//!
//! - `TemplateNotFound`/`TemplateProtected`: Template lifecycle errors
//!   - Built-in templates can be read and applied but never overwritten or deleted
//!
//! - `Validation`: Input validation failures
//!   - Use for user input validation (template IDs, paths, etc.)

use thiserror::Error;

/// Main error type for tfusage
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid resources: {0}")]
    InvalidResources(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template is built-in and cannot be modified: {0}")]
    TemplateProtected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse config: {0}")]
    ParseError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, UsageError>;
