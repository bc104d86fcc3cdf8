//! Terraform resources as seen by the usage engine
//!
//! Resources arrive either as a plain JSON array of
//! `{"name", "resource_type", "monthlyCost"}` objects or as the JSON document
//! printed by `infracost breakdown --format json`. Both are normalized here so
//! the engine only ever sees well-formed [`Resource`] values.
//!
//! Answers are paired with resources by position, so every input entry yields
//! exactly one `Resource`. Entries that cannot be used become placeholders with
//! an empty name, which the engine skips without shifting later answers.

use crate::error::{Result, UsageError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// A Terraform resource, keyed by its unique name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub resource_type: String,
    /// Monthly cost as reported by the breakdown, kept as a decimal string
    #[serde(rename = "monthlyCost", default, skip_serializing_if = "Option::is_none")]
    pub monthly_cost: Option<String>,
}

impl Resource {
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            monthly_cost: None,
        }
    }

    pub fn with_monthly_cost(mut self, cost: impl Into<String>) -> Self {
        self.monthly_cost = Some(cost.into());
        self
    }
}

/// Loosely typed resource entry as found in input documents
#[derive(Debug, Deserialize)]
struct RawResource {
    name: Option<String>,
    #[serde(alias = "resourceType")]
    resource_type: Option<String>,
    #[serde(rename = "monthlyCost")]
    monthly_cost: Option<Value>,
}

impl RawResource {
    fn into_resource(self) -> Resource {
        let monthly_cost = match self.monthly_cost {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Resource {
            name: self.name.unwrap_or_default(),
            resource_type: self.resource_type.unwrap_or_default(),
            monthly_cost,
        }
    }
}

/// Parse resources from a JSON array or an infracost breakdown document.
///
/// The result has one entry per input entry, in input order. Entries without a
/// name, and entries that are not resource objects, are kept as unnamed
/// placeholders and logged. A missing type becomes the empty string, which the
/// engine treats as an unscheduled resource.
pub fn parse_resources(json: &str) -> Result<Vec<Resource>> {
    let document: Value = serde_json::from_str(json)?;

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(ref map) if map.contains_key("projects") => breakdown_resources(&document)?,
        _ => {
            return Err(UsageError::InvalidResources(
                "Expected a JSON array of resources or an infracost breakdown".to_string(),
            ))
        }
    };

    let resources = entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| match serde_json::from_value::<RawResource>(entry) {
            Ok(raw) => {
                let resource = raw.into_resource();
                if resource.name.is_empty() {
                    warn!("Resource #{} has no name and will be skipped", idx);
                }
                resource
            }
            Err(e) => {
                warn!("Resource #{} is malformed and will be skipped: {}", idx, e);
                Resource::new("", "")
            }
        })
        .collect();

    Ok(resources)
}

fn breakdown_resources(document: &Value) -> Result<Vec<Value>> {
    let project = document
        .get("projects")
        .and_then(|p| p.as_array())
        .and_then(|p| p.first())
        .ok_or_else(|| {
            UsageError::InvalidResources("No projects found in infracost output".to_string())
        })?;

    let breakdown = project
        .get("breakdown")
        .filter(|b| !b.is_null())
        .ok_or_else(|| {
            UsageError::InvalidResources("No cost breakdown found for the project".to_string())
        })?;

    Ok(breakdown
        .get("resources")
        .and_then(|r| r.as_array())
        .cloned()
        .unwrap_or_default())
}

/// Read and parse a resources file.
pub fn load_resources(path: &Path) -> Result<Vec<Resource>> {
    let content = std::fs::read_to_string(path)?;
    parse_resources(&content)
}
