//! Configuration file handling.
//!
//! This module handles loading configuration from `.profilegen.toml`
//! files. Every key has a default, so running without a file describes the
//! built-in subject.

use crate::fetch::Endpoints;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".profilegen.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// What to describe and where the document lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// GitHub login whose profile is rendered.
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Mustache template path.
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Rendered output path, overwritten on every render.
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            template: default_template(),
            output: default_output(),
        }
    }
}

fn default_subject() -> String {
    "Mesure73L".to_string()
}

fn default_template() -> PathBuf {
    PathBuf::from("main.mustache")
}

fn default_output() -> PathBuf {
    PathBuf::from("README.md")
}

/// Remote endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GitHub REST API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Random quote endpoint (zenquotes response shape).
    #[serde(default = "default_quote_url")]
    pub quote_url: String,

    /// User-Agent header; GitHub rejects requests without one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            quote_url: default_quote_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_quote_url() -> String {
    "https://zenquotes.io/api/random".to_string()
}

fn default_user_agent() -> String {
    format!("profilegen/{}", env!("CARGO_PKG_VERSION"))
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
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Endpoints the fetch tasks should query.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(
            &self.api.base_url,
            &self.general.subject,
            &self.api.quote_url,
        )
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
