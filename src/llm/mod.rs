// src/llm/mod.rs
// External prompt service abstraction (image analysis, free-text parsing, optimization)

pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PromptError, Result};
use crate::image::ImagePayload;
use crate::prompt::PromptSection;

pub use gemini::GeminiClient;

/// Result of decomposing free-form prompt text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPrompt {
    pub title: String,
    pub prompt: PromptSection,
}

/// Capabilities the core consumes from an external AI service.
///
/// Every call either yields a complete PromptSection-shaped value or a
/// `PromptError::ExternalService`; implementations must not return partially
/// decoded sections.
#[async_trait]
pub trait PromptService: Send + Sync {
    /// Provider name for logging/identification
    fn name(&self) -> &'static str;

    /// Reverse-engineer the 8-section schema from an image
    async fn analyze_image(&self, image: &ImagePayload) -> Result<PromptSection>;

    /// Decompose unstructured prompt text and propose a title
    async fn parse_free_text(&self, raw_text: &str) -> Result<ParsedPrompt>;

    /// Refine a schema; the result replaces the input wholesale
    async fn optimize(&self, section: &PromptSection) -> Result<PromptSection>;
}

/// Stand-in used when no API key is configured; every call fails
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredService;

impl UnconfiguredService {
    fn unavailable() -> PromptError {
        PromptError::ExternalService(
            "no prompt service configured (set GEMINI_API_KEY)".to_string(),
        )
    }
}

#[async_trait]
impl PromptService for UnconfiguredService {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn analyze_image(&self, _image: &ImagePayload) -> Result<PromptSection> {
        Err(Self::unavailable())
    }

    async fn parse_free_text(&self, _raw_text: &str) -> Result<ParsedPrompt> {
        Err(Self::unavailable())
    }

    async fn optimize(&self, _section: &PromptSection) -> Result<PromptSection> {
        Err(Self::unavailable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_service_fails_every_call() {
        let service = UnconfiguredService;
        let image = ImagePayload::new(vec![1], "image/png").unwrap();

        let err = service.analyze_image(&image).await.unwrap_err();
        assert!(matches!(err, PromptError::ExternalService(_)));
        assert!(service.parse_free_text("x").await.is_err());
        assert!(service.optimize(&PromptSection::example()).await.is_err());
    }

    #[test]
    fn test_parsed_prompt_wire_shape() {
        let json = r#"{"title":"Neon Noir","prompt":{"purpose":"a","userPerson":"b","targetCharacter":"c","interaction":"d","environment":"e","lighting":"f","style":"g","negative":"h"}}"#;
        let parsed: ParsedPrompt = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title, "Neon Noir");
        assert_eq!(parsed.prompt.negative, "h");
    }
}
