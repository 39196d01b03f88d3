use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration loaded from postly.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Font catalog and activation endpoints
    #[serde(default)]
    pub fonts: FontsConfig,

    /// Export destination and encoding options
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FontsConfig {
    /// Catalog endpoint returning `{"items": [...]}`
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// API key appended as `key=` to catalog requests
    #[serde(default)]
    pub api_key: Option<String>,

    /// Stylesheet endpoint used to activate a family
    #[serde(default = "default_stylesheet_url")]
    pub stylesheet_url: String,

    /// Weights requested when the catalog has nothing better
    #[serde(default = "default_weights")]
    pub default_weights: Vec<String>,

    /// How many catalog entries a font picker should show
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_catalog_url() -> String {
    "https://www.googleapis.com/webfonts/v1/webfonts".to_string()
}

fn default_stylesheet_url() -> String {
    "https://fonts.googleapis.com/css2".to_string()
}

fn default_weights() -> Vec<String> {
    vec!["400".to_string(), "700".to_string()]
}

fn default_display_limit() -> usize {
    100
}

fn default_timeout() -> u64 {
    10
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            api_key: None,
            stylesheet_url: default_stylesheet_url(),
            default_weights: default_weights(),
            display_limit: default_display_limit(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl FontsConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Directory exported files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Re-compress PNG output losslessly with oxipng
    #[serde(default = "default_optimize_png")]
    pub optimize_png: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_optimize_png() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            optimize_png: default_optimize_png(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when the
    /// file is missing or malformed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        catalog = %config.fonts.catalog_url,
                        output_dir = %config.export.output_dir.display(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
