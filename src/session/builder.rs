// src/session/builder.rs
// Prompt builder screen state

use serde::Serialize;
use tracing::debug;

use crate::error::{PromptError, Result};
use crate::image::ImagePayload;
use crate::prompt::{FormatOptions, PromptField, PromptSection, append_keyword, format_prompt};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderState {
    form: PromptSection,
    strict_identity: bool,
    reference_image: Option<ImagePayload>,
    final_prompt: Option<String>,
    optimizing: bool,
}

impl BuilderState {
    pub fn form(&self) -> &PromptSection {
        &self.form
    }

    pub fn strict_identity(&self) -> bool {
        self.strict_identity
    }

    pub fn reference_image(&self) -> Option<&ImagePayload> {
        self.reference_image.as_ref()
    }

    /// Last generated prompt text, if any
    pub fn final_prompt(&self) -> Option<&str> {
        self.final_prompt.as_deref()
    }

    pub fn is_optimizing(&self) -> bool {
        self.optimizing
    }

    fn options(&self) -> FormatOptions {
        FormatOptions::strict(self.strict_identity)
    }

    pub(super) fn edit(&mut self, field: PromptField, value: String) {
        self.form.set(field, value);
    }

    pub(super) fn add_keyword(&mut self, field: PromptField, keyword: &str) {
        let updated = append_keyword(self.form.get(field), keyword);
        self.form.set(field, updated);
    }

    pub(super) fn toggle_strict_identity(&mut self) {
        self.strict_identity = !self.strict_identity;
    }

    pub(super) fn set_reference_image(&mut self, image: Option<ImagePayload>) {
        self.reference_image = image;
    }

    pub(super) fn generate(&mut self) {
        self.final_prompt = Some(format_prompt(&self.form, self.options()));
    }

    /// Back to the empty form; the strict toggle and reference image stay
    pub(super) fn reset(&mut self) {
        self.form = PromptSection::empty();
        self.final_prompt = None;
    }

    pub(super) fn copy_text(&self) -> Result<String> {
        self.final_prompt
            .clone()
            .ok_or_else(|| PromptError::Validation("generate a prompt before copying".into()))
    }

    pub(super) fn begin_optimize(&mut self) -> Result<PromptSection> {
        if self.optimizing {
            return Err(PromptError::Busy("optimize"));
        }
        self.optimizing = true;
        Ok(self.form.clone())
    }

    /// Apply an optimize result. The service output replaces the whole form;
    /// on failure the form and generated prompt stay as they were.
    pub(super) fn finish_optimize(&mut self, result: Result<PromptSection>) -> Result<()> {
        self.optimizing = false;
        let optimized = result?;
        debug!("Applying optimized prompt");
        self.final_prompt = Some(format_prompt(&optimized, self.options()));
        self.form = optimized;
        Ok(())
    }
}
