// src/llm/gemini/client.rs
// Google Gemini generateContent client implementing PromptService
// JSON response mode with a response schema; no retries at this layer

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{Span, debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{PromptError, Result};
use crate::http::{DEFAULT_TIMEOUT, create_client};
use crate::image::ImagePayload;
use crate::llm::gemini::extraction::{decode_json, extract_text};
use crate::llm::gemini::instructions::{
    ANALYZE_INSTRUCTION, PARSE_SYSTEM_INSTRUCTION, optimize_message, parse_message,
    parsed_schema, section_schema,
};
use crate::llm::gemini::types::{
    GeminiContent, GeminiPart, GeminiRequest, GeminiResponse, GenerationConfig, InlineData,
};
use crate::llm::{ParsedPrompt, PromptService};
use crate::prompt::PromptSection;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model for all three operations
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Google Gemini API client
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client with default model
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    /// Create a new Gemini client with custom model
    pub fn with_model(api_key: String, model: String) -> Self {
        Self::with_timeout(api_key, model, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            http: create_client(timeout),
        }
    }

    /// Point the client at a different API root (local mocks, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    // The key travels in a header so it never appears in URLs, logs or errors
    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    /// Send one generateContent request and decode the JSON answer as `T`
    #[instrument(skip(self, request), fields(request_id, model = %self.model))]
    async fn generate<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: GeminiRequest,
    ) -> Result<T> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        Span::current().record("request_id", request_id.as_str());

        info!(request_id = %request_id, operation, "Starting Gemini request");

        let response = self
            .http
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!(request_id = %request_id, status = %status, duration_ms, "Gemini request failed");
            return Err(PromptError::ExternalService(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let data: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            PromptError::ExternalService(format!("failed to parse Gemini response: {}", e))
        })?;

        if let Some(ref usage) = data.usage_metadata {
            debug!(
                request_id = %request_id,
                prompt_tokens = usage.prompt_token_count.unwrap_or(0),
                completion_tokens = usage.candidates_token_count.unwrap_or(0),
                "Gemini usage"
            );
        }

        let text = extract_text(&data)?;
        let decoded = decode_json(&text);
        match &decoded {
            Ok(_) => info!(request_id = %request_id, duration_ms, "Gemini request complete"),
            Err(e) => warn!(request_id = %request_id, error = %e, "Gemini returned malformed JSON"),
        }
        decoded
    }
}

#[async_trait]
impl PromptService for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn analyze_image(&self, image: &ImagePayload) -> Result<PromptSection> {
        let request = GeminiRequest {
            contents: vec![GeminiContent::user(vec![
                GeminiPart::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type().to_string(),
                        data: image.to_base64(),
                    },
                },
                GeminiPart::text(ANALYZE_INSTRUCTION),
            ])],
            system_instruction: None,
            generation_config: GenerationConfig::json(section_schema()),
        };
        self.generate("analyze_image", request).await
    }

    async fn parse_free_text(&self, raw_text: &str) -> Result<ParsedPrompt> {
        let request = GeminiRequest {
            contents: vec![GeminiContent::user(vec![GeminiPart::text(parse_message(
                raw_text,
            ))])],
            system_instruction: Some(GeminiContent::system(PARSE_SYSTEM_INSTRUCTION)),
            generation_config: GenerationConfig::json(parsed_schema()),
        };
        self.generate("parse_free_text", request).await
    }

    async fn optimize(&self, section: &PromptSection) -> Result<PromptSection> {
        let request = GeminiRequest {
            contents: vec![GeminiContent::user(vec![GeminiPart::text(
                optimize_message(section)?,
            )])],
            system_instruction: None,
            generation_config: GenerationConfig::json(section_schema()),
        };
        self.generate("optimize", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        assert_eq!(DEFAULT_MODEL, "gemini-3-flash-preview");
    }

    #[test]
    fn test_api_base() {
        assert!(GEMINI_API_BASE.contains("googleapis.com"));
    }

    #[test]
    fn test_client_new() {
        let client = GeminiClient::new("test-key".to_string());
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(
            client.endpoint(),
            format!("{}/{}:generateContent?key=test-key", GEMINI_API_BASE, DEFAULT_MODEL)
        );
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let client = GeminiClient::with_model("k".into(), "m".into())
            .with_base_url("http://127.0.0.1:9999/v1beta/models/");
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9999/v1beta/models/m:generateContent?key=k"
        );
    }
}
