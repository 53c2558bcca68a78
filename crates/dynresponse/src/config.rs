// File: src/config.rs
// Purpose: Configuration parsing from dynresponse.toml and the process-wide settings

use anyhow::{Context, Result};
use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment override for [`ResponseConfig::json_form_errors`].
pub const JSON_FORM_ERRORS_ENV: &str = "DYNAMICRESPONSE_JSON_FORM_ERRORS";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub response: ResponseConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Directory of `*.html` templates (default: "templates")
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
}

/// Dynamic response behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Include structured form errors in INVALID JSON responses
    #[serde(default)]
    pub json_form_errors: bool,
}

fn default_name() -> String {
    "dynresponse-app".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            templates_dir: default_templates_dir(),
        }
    }
}

impl ResponseConfig {
    /// Apply the environment override, if set to a parseable bool.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(raw) = std::env::var(JSON_FORM_ERRORS_ENV) {
            match parse_flag(&raw) {
                Some(flag) => self.json_form_errors = flag,
                None => tracing::warn!(
                    value = %raw,
                    "Ignoring {} (expected true/false)",
                    JSON_FORM_ERRORS_ENV
                ),
            }
        }
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./dynresponse.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("dynresponse.toml")
    }
}

static SETTINGS: OnceCell<ResponseConfig> = OnceCell::new();
static FALLBACK: Lazy<ResponseConfig> = Lazy::new(|| ResponseConfig::default().with_env_override());

/// Install the process-wide settings. Returns `false` if already installed.
pub fn install(config: ResponseConfig) -> bool {
    SETTINGS.set(config).is_ok()
}

/// Settings read when a response is serialized. Without [`install`], the
/// defaults plus the environment override are used.
pub fn settings() -> &'static ResponseConfig {
    SETTINGS.get().unwrap_or_else(|| Lazy::force(&FALLBACK))
}
