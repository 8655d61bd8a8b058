// src/library/store.rs
// In-memory template library (most recent first, write-once)

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{PromptError, Result};
use crate::prompt::{PromptSection, format_display};

/// A saved (title, image, schema, formatted text) bundle.
///
/// Fields are private: a template is immutable once created, and `prompt`
/// is an owned copy independent of any live editor state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    id: String,
    title: String,
    image_url: String,
    prompt: PromptSection,
    full_prompt: String,
    created_at: DateTime<Utc>,
}

impl Template {
    /// Build a template with a fresh id; `full_prompt` is rendered now and
    /// cached. An empty `image_url` means no image was provided.
    pub fn new(
        title: impl Into<String>,
        image_url: impl Into<String>,
        prompt: PromptSection,
    ) -> Self {
        let full_prompt = format_display(&prompt);
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            image_url: image_url.into(),
            prompt,
            full_prompt,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn prompt(&self) -> &PromptSection {
        &self.prompt
    }

    pub fn full_prompt(&self) -> &str {
        &self.full_prompt
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.image_url.trim().is_empty() {
            missing.push("image");
        }
        if self.prompt.purpose.trim().is_empty() {
            missing.push("purpose");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PromptError::Validation(format!(
                "a template needs a title, an image and a purpose (missing: {})",
                missing.join(", ")
            )))
        }
    }
}

/// Ordered template collection owned by one session
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the starter templates
    pub fn seeded() -> Self {
        Self {
            templates: super::seed::starter_templates(),
        }
    }

    /// Insert at the front. Validation runs before mutation, so a rejected
    /// template leaves the store untouched.
    pub fn add(&mut self, template: Template) -> Result<()> {
        if let Err(e) = template.validate() {
            debug!(title = %template.title, error = %e, "Rejected template");
            return Err(e);
        }
        info!(id = %template.id, title = %template.title, "Template saved");
        self.templates.insert(0, template);
        Ok(())
    }

    /// Snapshot in most-recent-first order
    pub fn list(&self) -> Vec<Template> {
        self.templates.clone()
    }

    pub fn get(&self, id: &str) -> Option<Template> {
        self.templates.iter().find(|t| t.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
