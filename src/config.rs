//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.creative-console.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".creative-console.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Analysis service settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,

    /// Report rendering settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Analysis service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the analysis service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Requests wait indefinitely when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the JSON export is written to.
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Report rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Write the rendered report as a standalone HTML page here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.creative-console.toml` from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref api_url) = args.api_url {
            self.api.base_url = api_url.clone();
        }

        if let Some(timeout) = args.timeout {
            self.api.timeout_seconds = Some(timeout);
        }

        if let Some(ref dir) = args.export_dir {
            self.export.directory = dir.clone();
        }

        if let Some(ref html) = args.html {
            self.report.html_output = Some(html.clone());
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.api.timeout_seconds.is_none());
        assert_eq!(config.export.directory, PathBuf::from("."));
        assert!(config.report.html_output.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[api]
base_url = "https://analysis.internal:9000"
timeout_seconds = 600

[export]
directory = "exports"

[report]
html_output = "report.html"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.api.base_url, "https://analysis.internal:9000");
        assert_eq!(config.api.timeout_seconds, Some(600));
        assert_eq!(config.export.directory, PathBuf::from("exports"));
        assert_eq!(config.report.html_output, Some(PathBuf::from("report.html")));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[export]\ndirectory = \"out\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.export.directory, PathBuf::from("out"));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[api]\nbase_url = \"http://10.0.0.5:8000\"\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[api\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[export]"));
        assert!(toml_str.contains("base_url"));
    }
}
