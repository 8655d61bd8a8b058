// src/config/file.rs
// File-based configuration from ~/.cineprompt/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub builder: BuilderSection,
    #[serde(default)]
    pub web: WebSection,
}

/// Prompt service settings
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ServiceSection {
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Builder defaults for new sessions
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct BuilderSection {
    pub strict_identity: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct WebSection {
    pub port: Option<u16>,
}

impl FileConfig {
    /// Load config from ~/.cineprompt/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path; a missing or broken file yields defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cineprompt")
            .join("config.toml")
    }
}
