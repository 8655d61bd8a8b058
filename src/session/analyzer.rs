// src/session/analyzer.rs
// Image-to-prompt analyzer screen state

use serde::Serialize;
use tracing::debug;

use crate::error::{PromptError, Result};
use crate::image::ImagePayload;
use crate::prompt::{PromptSection, format_display};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerState {
    image: Option<ImagePayload>,
    result: Option<PromptSection>,
    analyzing: bool,
}

impl AnalyzerState {
    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&PromptSection> {
        self.result.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    /// A new image invalidates the previous analysis
    pub(super) fn select_image(&mut self, image: ImagePayload) {
        self.image = Some(image);
        self.result = None;
    }

    pub(super) fn begin_analyze(&mut self) -> Result<ImagePayload> {
        let image = self
            .image
            .clone()
            .ok_or_else(|| PromptError::Validation("select an image to analyze".into()))?;
        if self.analyzing {
            return Err(PromptError::Busy("analyze"));
        }
        self.analyzing = true;
        Ok(image)
    }

    /// Apply the analysis of `analyzed`. A reply for an image that has since
    /// been replaced is dropped; it never becomes the new image's result.
    pub(super) fn finish_analyze(
        &mut self,
        analyzed: &ImagePayload,
        result: Result<PromptSection>,
    ) -> Result<()> {
        self.analyzing = false;
        let section = result?;
        if self.image.as_ref() != Some(analyzed) {
            debug!(mime_type = analyzed.mime_type(), "Dropping analysis of a replaced image");
            return Ok(());
        }
        self.result = Some(section);
        Ok(())
    }

    pub(super) fn copy_text(&self) -> Result<String> {
        self.result
            .as_ref()
            .map(format_display)
            .ok_or_else(|| PromptError::Validation("analyze an image before copying".into()))
    }
}
