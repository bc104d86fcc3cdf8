//! Input validation utilities
//!
//! Provides validation functions for user-supplied template data so that
//! nothing malformed reaches the template directory.

use crate::error::{Result, UsageError};
use crate::usage::UsageParams;
use std::collections::BTreeMap;

/// Validate template ID
///
/// Template IDs double as file names, so they are restricted to
/// alphanumeric characters, hyphens and underscores, max 64 chars.
pub fn validate_template_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(UsageError::Validation {
            field: "template_id".to_string(),
            reason: "Template ID cannot be empty".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(UsageError::Validation {
            field: "template_id".to_string(),
            reason: format!(
                "Template ID must be <= 64 characters, got: {} (len: {})",
                id,
                id.len()
            ),
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(UsageError::Validation {
            field: "template_id".to_string(),
            reason: format!(
                "Template ID can only contain alphanumeric characters, hyphens, and underscores, got: {}",
                id
            ),
        });
    }

    Ok(())
}

/// Validate the resource type → usage parameter table of a template
///
/// Resource types and parameter names must be non-empty snake_case
/// identifiers, matching the shape of Terraform resource types.
pub fn validate_template_params(template: &BTreeMap<String, UsageParams>) -> Result<()> {
    for (resource_type, params) in template {
        if !is_identifier(resource_type) {
            return Err(UsageError::Validation {
                field: "template".to_string(),
                reason: format!("Invalid resource type: '{}'", resource_type),
            });
        }

        if let Some(bad) = params.keys().find(|name| !is_identifier(name)) {
            return Err(UsageError::Validation {
                field: "template".to_string(),
                reason: format!(
                    "Invalid usage parameter '{}' for resource type {}",
                    bad, resource_type
                ),
            });
        }
    }

    Ok(())
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
