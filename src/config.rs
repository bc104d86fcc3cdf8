use crate::error::ConfigError;
use crate::usage::{UsageDefaults, MAX_MONTHLY_HOURS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub defaults: UsageDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding custom usage templates
    pub dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates: TemplatesConfig::default(),
            defaults: UsageDefaults::default(),
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
        }
    }
}

fn default_templates_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("tfusage").join("templates"))
        .unwrap_or_else(|| PathBuf::from("templates"))
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .tfusage.toml in current dir, then ~/.config/tfusage/config.toml
            let local = PathBuf::from(".tfusage.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("tfusage").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".tfusage.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))
                .with_context(|| {
                    let mut err = format!("Failed to parse config: {}", config_path.display());
                    err.push_str("\n  Common issues:");
                    err.push_str("\n    - Invalid TOML syntax");
                    err.push_str("\n    - Missing 'dir' in the [templates] section");
                    err.push_str("\n    - Incorrect value types");
                    err.push_str("\n  Tip: Run 'tfusage init' to create a new config file");
                    err
                })?;
            config.validate()?;
            Ok(config)
        } else {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                tracing::warn!(
                    "Config file not found: {}. Using default configuration. Run 'tfusage init' to create a config file.",
                    config_path.display()
                );
            }
            Ok(Config::default())
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.defaults.monthly_hours > MAX_MONTHLY_HOURS {
            return Err(ConfigError::InvalidValue {
                field: "defaults.monthly_hours".to_string(),
                reason: format!(
                    "must be at most {} (hours in a month), got {}",
                    MAX_MONTHLY_HOURS, self.defaults.monthly_hours
                ),
            });
        }
        if self.templates.dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "templates.dir".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}
