// src/llm/gemini/extraction.rs
// Strict decoding of Gemini responses into prompt types

use serde::de::DeserializeOwned;

use crate::error::{PromptError, Result};
use crate::llm::gemini::types::GeminiResponse;

/// Concatenate the non-thought text parts of the first candidate
pub fn extract_text(response: &GeminiResponse) -> Result<String> {
    if let Some(ref error) = response.error {
        return Err(PromptError::ExternalService(format!(
            "Gemini error: {}",
            error.message
        )));
    }

    let candidate = response
        .candidates
        .as_ref()
        .and_then(|c| c.first())
        .ok_or_else(|| PromptError::external("Gemini returned no candidates"))?;

    let text: String = candidate
        .content
        .as_ref()
        .map(|content| {
            content
                .parts
                .iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
        return Err(PromptError::ExternalService(format!(
            "Gemini returned an empty response (finish reason: {})",
            reason
        )));
    }
    Ok(text)
}

/// Decode the JSON body of a response. Any deviation from the expected shape
/// is a service failure; nothing is salvaged from a malformed payload.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text.trim()).map_err(|e| {
        PromptError::ExternalService(format!("unparseable service response: {}", e))
    })
}
