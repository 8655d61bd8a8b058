// src/session/library.rs
// Template library screen state and the contribute flow

use serde::Serialize;
use tracing::debug;

use crate::error::{PromptError, Result};
use crate::image::ImagePayload;
use crate::library::{Template, TemplateStore};
use crate::llm::ParsedPrompt;
use crate::prompt::{PromptField, PromptSection};

/// Titles shorter than this are replaced by the service's suggestion
const MIN_KEPT_TITLE_CHARS: usize = 3;

/// Contents of the "contribute template" form
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributeDraft {
    pub title: String,
    pub cover: Option<ImagePayload>,
    pub raw_text: String,
    pub prompt: PromptSection,
    pub parsing: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryState {
    templates: TemplateStore,
    selected: Option<String>,
    contribute_open: bool,
    draft: ContributeDraft,
}

impl LibraryState {
    pub fn new(templates: TemplateStore) -> Self {
        Self {
            templates,
            ..Self::default()
        }
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Template open in the detail view
    pub fn selected(&self) -> Option<Template> {
        self.selected.as_deref().and_then(|id| self.templates.get(id))
    }

    pub fn is_contribute_open(&self) -> bool {
        self.contribute_open
    }

    pub fn draft(&self) -> &ContributeDraft {
        &self.draft
    }

    pub(super) fn select(&mut self, id: Option<String>) -> Result<()> {
        if let Some(ref id) = id
            && self.templates.get(id).is_none()
        {
            return Err(PromptError::Validation(format!("no template with id {}", id)));
        }
        self.selected = id;
        Ok(())
    }

    pub(super) fn copy_text(&self, id: &str) -> Result<String> {
        self.templates
            .get(id)
            .map(|t| t.full_prompt().to_string())
            .ok_or_else(|| PromptError::Validation(format!("no template with id {}", id)))
    }

    pub(super) fn set_contribute_open(&mut self, open: bool) {
        self.contribute_open = open;
    }

    pub(super) fn draft_mut(&mut self) -> &mut ContributeDraft {
        &mut self.draft
    }

    pub(super) fn edit_draft_field(&mut self, field: PromptField, value: String) {
        self.draft.prompt.set(field, value);
    }

    pub(super) fn begin_auto_fill(&mut self) -> Result<String> {
        if self.draft.raw_text.trim().is_empty() {
            return Err(PromptError::Validation(
                "enter the full prompt text to analyze".into(),
            ));
        }
        if self.draft.parsing {
            return Err(PromptError::Busy("auto-fill"));
        }
        self.draft.parsing = true;
        Ok(self.draft.raw_text.clone())
    }

    /// Apply a parse result: the structured prompt is replaced, and the title
    /// only when the user has not typed a meaningful one yet.
    pub(super) fn finish_auto_fill(&mut self, result: Result<ParsedPrompt>) -> Result<()> {
        self.draft.parsing = false;
        let parsed = result?;
        self.draft.prompt = parsed.prompt;
        if self.draft.title.trim().chars().count() < MIN_KEPT_TITLE_CHARS {
            self.draft.title = parsed.title;
        }
        debug!(title = %self.draft.title, "Draft auto-filled");
        Ok(())
    }

    /// Validate and store the draft. On success the form is reset and closed;
    /// on failure both the draft and the store are left as they were.
    pub(super) fn save(&mut self) -> Result<Template> {
        let image_url = self
            .draft
            .cover
            .as_ref()
            .map(ImagePayload::to_data_url)
            .unwrap_or_default();
        let template = Template::new(self.draft.title.trim(), image_url, self.draft.prompt.clone());
        self.templates.add(template.clone())?;
        self.draft = ContributeDraft::default();
        self.contribute_open = false;
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover() -> ImagePayload {
        ImagePayload::new(vec![1, 2, 3], "image/png").unwrap()
    }

    fn parsed(title: &str) -> ParsedPrompt {
        ParsedPrompt {
            title: title.into(),
            prompt: PromptSection::example(),
        }
    }

    #[test]
    fn test_auto_fill_requires_text() {
        let mut state = LibraryState::default();
        state.draft_mut().raw_text = "   ".into();
        assert!(matches!(state.begin_auto_fill(), Err(PromptError::Validation(_))));
        assert!(!state.draft().parsing);
    }

    #[test]
    fn test_auto_fill_sets_short_title() {
        let mut state = LibraryState::default();
        state.draft_mut().raw_text = "a knight at dawn".into();
        state.draft_mut().title = "ab".into();
        state.begin_auto_fill().unwrap();
        state.finish_auto_fill(Ok(parsed("Dawn Knight"))).unwrap();
        assert_eq!(state.draft().title, "Dawn Knight");
        assert_eq!(state.draft().prompt, PromptSection::example());
    }

    #[test]
    fn test_auto_fill_keeps_typed_title() {
        let mut state = LibraryState::default();
        state.draft_mut().raw_text = "a knight at dawn".into();
        state.draft_mut().title = "My Knight".into();
        state.begin_auto_fill().unwrap();
        state.finish_auto_fill(Ok(parsed("Dawn Knight"))).unwrap();
        assert_eq!(state.draft().title, "My Knight");
    }

    #[test]
    fn test_auto_fill_failure_keeps_draft() {
        let mut state = LibraryState::default();
        state.draft_mut().raw_text = "text".into();
        state.edit_draft_field(PromptField::Purpose, "Mine".into());
        state.begin_auto_fill().unwrap();
        assert!(matches!(state.begin_auto_fill(), Err(PromptError::Busy(_))));
        assert!(state
            .finish_auto_fill(Err(PromptError::ExternalService("bad json".into())))
            .is_err());
        assert_eq!(state.draft().prompt.purpose, "Mine");
        assert!(!state.draft().parsing);
    }

    #[test]
    fn test_save_validates_before_mutation() {
        let mut state = LibraryState::new(TemplateStore::seeded());
        state.set_contribute_open(true);
        state.draft_mut().title = "Neon Noir".into();
        state.edit_draft_field(PromptField::Purpose, "X".into());

        let err = state.save().unwrap_err();
        assert!(matches!(err, PromptError::Validation(_)));
        assert_eq!(state.templates().len(), 2);
        assert_eq!(state.draft().title, "Neon Noir");
        assert!(state.is_contribute_open());
    }

    #[test]
    fn test_save_prepends_and_resets() {
        let mut state = LibraryState::new(TemplateStore::seeded());
        state.set_contribute_open(true);
        state.draft_mut().title = "Neon Noir".into();
        state.draft_mut().cover = Some(cover());
        state.edit_draft_field(PromptField::Purpose, "X".into());

        let saved = state.save().unwrap();
        assert_eq!(state.templates().list()[0], saved);
        assert!(saved.image_url().starts_with("data:image/png;base64,"));
        assert!(!state.is_contribute_open());
        assert!(state.draft().title.is_empty());
    }

    #[test]
    fn test_select_unknown_template() {
        let mut state = LibraryState::new(TemplateStore::seeded());
        assert!(state.select(Some("nope".into())).is_err());
        assert!(state.selected().is_none());

        let id = state.templates().list()[1].id().to_string();
        state.select(Some(id.clone())).unwrap();
        assert_eq!(state.selected().unwrap().id(), id);
        assert_eq!(state.copy_text(&id).unwrap(), state.selected().unwrap().full_prompt());
    }
}
