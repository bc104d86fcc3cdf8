//! Exit code standardization for tfusage
//!
//! Provides consistent exit codes for different error types so scripts
//! driving the CLI can tell bad input apart from environment failures.
//!
//! ## Exit Code Convention
//!
//! - `0` = Success
//! - `1` = User error (invalid input, validation failure, template not found)
//! - `2` = System error (I/O failure, serialization failure)
//! - `3` = Configuration error (config parse error, invalid config value)

use crate::error::{ConfigError, UsageError};

/// Standard exit codes for tfusage
pub mod codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// User error (invalid input, validation failure)
    pub const USER_ERROR: i32 = 1;
    /// System error (filesystem, serialization)
    pub const SYSTEM_ERROR: i32 = 2;
    /// Configuration error (unreadable or invalid config)
    pub const CONFIG_ERROR: i32 = 3;
}

/// Map a UsageError to an appropriate exit code
pub fn exit_code_for_error(error: &UsageError) -> i32 {
    use UsageError::*;
    match error {
        Config(_) => codes::CONFIG_ERROR,

        Validation { .. } => codes::USER_ERROR,
        InvalidResources(_) => codes::USER_ERROR,
        TemplateNotFound(_) => codes::USER_ERROR,
        TemplateProtected(_) => codes::USER_ERROR,

        Io(_) => codes::SYSTEM_ERROR,
        Json(_) => codes::SYSTEM_ERROR,
    }
}

/// Map an error coming out of the CLI layer to an exit code.
///
/// Errors that did not originate as a `UsageError` or `ConfigError` (e.g.
/// argument handling wrapped in `anyhow` context) are treated as user errors.
pub fn exit_code_for_anyhow(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<UsageError>() {
            return exit_code_for_error(err);
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return codes::CONFIG_ERROR;
        }
    }
    codes::USER_ERROR
}
