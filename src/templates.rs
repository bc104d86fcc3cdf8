//! Usage templates
//!
//! A template is a named preset mapping Terraform resource types to usage
//! parameters ("Production Environment": instances run 720 hours, functions
//! take 1M requests, ...). Applying a template to a resource list gives every
//! resource of a covered type a copy of the preset.
//!
//! Three built-in templates are always available. Custom templates live as
//! `<id>.json` files in a directory owned by [`TemplateStore`]. Built-ins take
//! precedence on lookup and cannot be overwritten or deleted.

use crate::error::{Result, UsageError};
use crate::resource::Resource;
use crate::usage::UsageParams;
use crate::validation::{validate_template_id, validate_template_params};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A named usage preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Resource type → usage parameters
    pub template: BTreeMap<String, UsageParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn params(pairs: &[(&str, u64)]) -> UsageParams {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn preset(
    id: &str,
    name: &str,
    description: &str,
    entries: Vec<(&str, UsageParams)>,
) -> UsageTemplate {
    UsageTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        template: entries
            .into_iter()
            .map(|(resource_type, params)| (resource_type.to_string(), params))
            .collect(),
        created_at: None,
    }
}

/// Templates shipped with tfusage
pub fn builtin_templates() -> Vec<UsageTemplate> {
    vec![
        preset(
            "dev-environment",
            "Development Environment",
            "Resources run during business hours (8 hours/day, weekdays)",
            vec![
                ("aws_instance", params(&[("monthly_hours", 160)])),
                ("aws_lambda_function", params(&[("monthly_requests", 10_000)])),
                (
                    "aws_s3_bucket",
                    params(&[
                        ("monthly_storage_gb", 5),
                        ("monthly_get_requests", 1_000),
                        ("monthly_put_requests", 500),
                    ]),
                ),
                ("aws_rds_instance", params(&[("monthly_hours", 160), ("storage_gb", 20)])),
            ],
        ),
        preset(
            "prod-environment",
            "Production Environment",
            "24/7 operation with moderate traffic",
            vec![
                ("aws_instance", params(&[("monthly_hours", 720)])),
                ("aws_lambda_function", params(&[("monthly_requests", 1_000_000)])),
                (
                    "aws_s3_bucket",
                    params(&[
                        ("monthly_storage_gb", 100),
                        ("monthly_get_requests", 100_000),
                        ("monthly_put_requests", 50_000),
                    ]),
                ),
                ("aws_rds_instance", params(&[("monthly_hours", 720), ("storage_gb", 100)])),
            ],
        ),
        preset(
            "high-traffic",
            "High Traffic Application",
            "24/7 operation with high traffic and usage",
            vec![
                ("aws_instance", params(&[("monthly_hours", 720)])),
                ("aws_lambda_function", params(&[("monthly_requests", 10_000_000)])),
                (
                    "aws_s3_bucket",
                    params(&[
                        ("monthly_storage_gb", 500),
                        ("monthly_get_requests", 1_000_000),
                        ("monthly_put_requests", 500_000),
                    ]),
                ),
                ("aws_rds_instance", params(&[("monthly_hours", 720), ("storage_gb", 500)])),
            ],
        ),
    ]
}

pub fn is_builtin(id: &str) -> bool {
    builtin_templates().iter().any(|t| t.id == id)
}

/// Apply `template` to `resources`, keyed by resource name.
///
/// Resources whose type the template does not cover are left out.
pub fn apply_template(
    template: &UsageTemplate,
    resources: &[Resource],
) -> BTreeMap<String, UsageParams> {
    resources
        .iter()
        .filter(|r| !r.name.is_empty())
        .filter_map(|r| {
            template
                .template
                .get(&r.resource_type)
                .map(|params| (r.name.clone(), params.clone()))
        })
        .collect()
}

/// Directory-backed template storage
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Custom templates found in the store directory.
    ///
    /// Unreadable or incomplete files are skipped with a warning. A missing
    /// directory means there are no custom templates.
    pub fn custom_templates(&self) -> Vec<UsageTemplate> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("No custom templates in {}: {}", self.dir.display(), e);
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        paths
            .iter()
            .filter_map(|path| match read_template(path) {
                Ok(template) => Some(template),
                Err(e) => {
                    warn!("Error loading template {}: {}", path.display(), e);
                    None
                }
            })
            .collect()
    }

    /// Built-in templates followed by custom ones.
    pub fn all(&self) -> Vec<UsageTemplate> {
        let mut templates = builtin_templates();
        templates.extend(
            self.custom_templates()
                .into_iter()
                .filter(|t| !is_builtin(&t.id)),
        );
        templates
    }

    /// Look up a template by ID, built-ins first.
    pub fn get(&self, id: &str) -> Result<Option<UsageTemplate>> {
        if let Some(template) = builtin_templates().into_iter().find(|t| t.id == id) {
            return Ok(Some(template));
        }

        validate_template_id(id)?;
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        read_template(&path).map(Some)
    }

    /// Persist a custom template and return it as stored.
    pub fn save(&self, mut template: UsageTemplate) -> Result<UsageTemplate> {
        validate_template_id(&template.id)?;
        validate_template_params(&template.template)?;

        if is_builtin(&template.id) {
            return Err(UsageError::TemplateProtected(template.id));
        }

        fs::create_dir_all(&self.dir)?;
        if template.created_at.is_none() {
            template.created_at = Some(Utc::now());
        }

        let content = serde_json::to_string_pretty(&template)?;
        fs::write(self.path_for(&template.id), content)?;
        info!("Saved template {} to {}", template.id, self.dir.display());

        Ok(template)
    }

    /// Delete a custom template.
    pub fn delete(&self, id: &str) -> Result<()> {
        if is_builtin(id) {
            return Err(UsageError::TemplateProtected(id.to_string()));
        }

        validate_template_id(id)?;
        let path = self.path_for(id);
        if !path.exists() {
            return Err(UsageError::TemplateNotFound(id.to_string()));
        }

        fs::remove_file(&path)?;
        info!("Deleted template {}", id);
        Ok(())
    }

    /// Apply the template `id` to `resources`.
    pub fn apply(&self, id: &str, resources: &[Resource]) -> Result<BTreeMap<String, UsageParams>> {
        let template = self
            .get(id)?
            .ok_or_else(|| UsageError::TemplateNotFound(id.to_string()))?;
        Ok(apply_template(&template, resources))
    }
}

fn read_template(path: &Path) -> Result<UsageTemplate> {
    let content = fs::read_to_string(path)?;
    let template: UsageTemplate = serde_json::from_str(&content)?;
    Ok(template)
}
