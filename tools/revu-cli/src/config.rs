//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CLI configuration file (`revu.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Site settings.
    #[serde(default)]
    pub site: SiteSettings,

    /// Configs directory settings.
    #[serde(default)]
    pub configs: ConfigsSettings,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Site-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Site name, used in scaffolding output.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Externally visible base URL, used to derive preview metadata.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_site_name() -> String {
    "revu".to_string()
}

fn default_base_url() -> String {
    "https://example.com".to_string()
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            base_url: default_base_url(),
        }
    }
}

/// Where tenant config files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigsSettings {
    /// Directory holding `<key>.json` files.
    #[serde(default = "default_configs_dir")]
    pub dir: String,
}

fn default_configs_dir() -> String {
    "configs".to_string()
}

impl Default for ConfigsSettings {
    fn default() -> Self {
        Self {
            dir: default_configs_dir(),
        }
    }
}

/// Generate a default revu.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Revu site configuration

[site]
name = "{name}"
base_url = "https://example.com"

[configs]
dir = "configs"
"#,
        name = name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.site.name, "revu");
        assert_eq!(config.configs.dir, "configs");
    }

    #[test]
    fn test_generated_default_config_parses() {
        let content = generate_default_config("mysite");
        let config: CliConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.site.name, "mysite");
        assert_eq!(config.site.base_url, "https://example.com");
    }
}
