// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use std::time::Duration;
use tracing::{debug, info, warn};

/// API keys loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// Gemini/Google API key (GEMINI_API_KEY or GOOGLE_API_KEY)
    pub gemini: Option<String>,
}

impl ApiKeys {
    /// Load API keys from environment variables
    ///
    /// Set `CINEPROMPT_OFFLINE=1` to ignore any configured key
    pub fn from_env() -> Self {
        if parse_bool_env("CINEPROMPT_OFFLINE").unwrap_or(false) {
            info!("CINEPROMPT_OFFLINE is set, prompt service disabled");
            return Self::default();
        }

        let keys = Self {
            gemini: read_var("GEMINI_API_KEY").or_else(|| read_var("GOOGLE_API_KEY")),
        };
        if keys.gemini.is_none() {
            warn!("No API key configured - analyze, auto-fill and optimize will fail");
        } else {
            debug!("Gemini API key loaded");
        }
        keys
    }

    pub fn has_prompt_service(&self) -> bool {
        self.gemini.is_some()
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            lines.extend(self.errors.iter().map(|e| format!("  - {}", e)));
        }
        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            lines.extend(self.warnings.iter().map(|w| format!("  - {}", w)));
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_keys: ApiKeys,
    /// Model override (CINEPROMPT_MODEL)
    pub model: Option<String>,
    /// HTTP API port (CINEPROMPT_PORT)
    pub port: Option<u16>,
    /// Service request timeout (CINEPROMPT_TIMEOUT_SECS)
    pub timeout_secs: Option<u64>,
    /// Raw values that failed to parse, kept for `validate`
    pub(crate) invalid: Vec<(&'static str, String)>,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");

        let mut invalid = Vec::new();
        let port = parse_var("CINEPROMPT_PORT", &mut invalid);
        let timeout_secs = parse_var("CINEPROMPT_TIMEOUT_SECS", &mut invalid);

        Self {
            api_keys: ApiKeys::from_env(),
            model: read_var("CINEPROMPT_MODEL"),
            port,
            timeout_secs,
            invalid,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if !self.api_keys.has_prompt_service() {
            validation.add_warning(
                "No API key configured. Set GEMINI_API_KEY to enable analyze, auto-fill and optimize.",
            );
        }

        for (name, value) in &self.invalid {
            validation.add_error(format!("{} has invalid value '{}'", name, value));
        }

        if self.timeout_secs == Some(0) {
            validation.add_error("CINEPROMPT_TIMEOUT_SECS must be greater than zero");
        }

        validation
    }
}

/// Read a variable, filtering empty values
fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    invalid: &mut Vec<(&'static str, String)>,
) -> Option<T> {
    let raw = read_var(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "Ignoring unparseable environment variable");
            invalid.push((name, raw));
            None
        }
    }
}

fn parse_bool_env(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?.to_lowercase();
    match value.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
