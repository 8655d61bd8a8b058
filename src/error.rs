// src/error.rs
// Error taxonomy shared by the prompt core, the session reducer and the front ends

use thiserror::Error;

/// Main error type for cineprompt
#[derive(Error, Debug)]
pub enum PromptError {
    /// Required input is missing before a local mutation
    #[error("missing required input: {0}")]
    Validation(String),

    /// A non-image file was offered where an image is required
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// The analyze/parse/optimize call failed or returned unparseable output
    #[error("external service failed: {0}")]
    ExternalService(String),

    /// The same service action is already in flight
    #[error("{0} is already in progress")]
    Busy(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Result using PromptError
pub type Result<T> = std::result::Result<T, PromptError>;

impl PromptError {
    /// Stable tag for API responses and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::UnsupportedInput(_) => "unsupported_input",
            Self::ExternalService(_) => "external_service",
            Self::Busy(_) => "busy",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }

    /// True when the user has to correct their input rather than retry later
    pub fn is_user_input(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnsupportedInput(_))
    }

    /// Message shown to the user at the point of the failed action
    pub fn to_user_string(&self) -> String {
        match self {
            Self::ExternalService(_) => {
                format!("{}. Nothing was changed; try again later.", self)
            }
            Self::Validation(_) | Self::UnsupportedInput(_) => {
                format!("{}. Please fix the input and try again.", self)
            }
            _ => self.to_string(),
        }
    }

    pub(crate) fn external(err: impl std::fmt::Display) -> Self {
        Self::ExternalService(err.to_string())
    }
}

// reqwest's Display carries the request URL, and with it the API key
impl From<reqwest::Error> for PromptError {
    fn from(err: reqwest::Error) -> Self {
        Self::ExternalService(err.without_url().to_string())
    }
}

impl From<tokio::task::JoinError> for PromptError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::ExternalService(format!("service task failed: {}", err))
    }
}
