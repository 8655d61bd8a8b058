// tests/common/mod.rs
// Shared fakes for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use cineprompt::error::{PromptError, Result};
use cineprompt::image::ImagePayload;
use cineprompt::llm::{ParsedPrompt, PromptService};
use cineprompt::prompt::PromptSection;

/// Scripted PromptService. `fail` makes every call an ExternalService error;
/// `gate`, when set, holds each call until notified.
#[derive(Default)]
pub struct FakeService {
    pub fail: bool,
    pub analyzed: PromptSection,
    pub parsed_title: String,
    pub gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
}

impl FakeService {
    pub fn working() -> Self {
        Self {
            analyzed: PromptSection::example(),
            parsed_title: "Parsed Title".into(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::working()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref gate) = self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(PromptError::ExternalService("fake service is down".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PromptService for FakeService {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn analyze_image(&self, _image: &ImagePayload) -> Result<PromptSection> {
        self.enter().await?;
        Ok(self.analyzed.clone())
    }

    async fn parse_free_text(&self, raw_text: &str) -> Result<ParsedPrompt> {
        self.enter().await?;
        Ok(ParsedPrompt {
            title: self.parsed_title.clone(),
            prompt: PromptSection {
                purpose: raw_text.to_string(),
                ..PromptSection::example()
            },
        })
    }

    async fn optimize(&self, section: &PromptSection) -> Result<PromptSection> {
        self.enter().await?;
        Ok(PromptSection {
            purpose: format!("{} (optimized)", section.purpose),
            ..section.clone()
        })
    }
}

pub fn png() -> ImagePayload {
    ImagePayload::new(vec![0x89, b'P', b'N', b'G'], "image/png").expect("valid png payload")
}
