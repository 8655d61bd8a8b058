// src/config/mod.rs
// Configuration: environment over config file over built-in defaults

pub mod env;
pub mod file;

pub use env::{ApiKeys, ConfigValidation, EnvConfig};
pub use file::FileConfig;

use std::time::Duration;

use crate::http::DEFAULT_TIMEOUT;
use crate::llm::gemini::DEFAULT_MODEL;

/// Default port for `serve`
pub const DEFAULT_PORT: u16 = 3030;

/// Effective settings after merging all sources
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
    pub port: u16,
    pub strict_identity: bool,
}

impl Settings {
    pub fn resolve(env: &EnvConfig, file: &FileConfig) -> Self {
        Self {
            api_key: env.api_keys.gemini.clone(),
            model: env
                .model
                .clone()
                .or_else(|| file.service.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: env
                .timeout()
                .or_else(|| file.service.timeout_secs.map(Duration::from_secs))
                .filter(|t| !t.is_zero())
                .unwrap_or(DEFAULT_TIMEOUT),
            port: env.port.or(file.web.port).unwrap_or(DEFAULT_PORT),
            strict_identity: file.builder.strict_identity.unwrap_or(false),
        }
    }
}
