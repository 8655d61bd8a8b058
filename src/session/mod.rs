// src/session/mod.rs
// Single-user editing session: one reducer shared by the REPL and HTTP front ends
//
// Front ends call `dispatch` with an Action and act on the returned Effect.
// Service work is described by a ServiceRequest, executed outside any lock,
// and its ServiceReply is fed back through `resolve`.

pub mod analyzer;
pub mod builder;
pub mod library;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::image::ImagePayload;
use crate::library::TemplateStore;
use crate::llm::{ParsedPrompt, PromptService};
use crate::prompt::{PromptField, PromptSection};

pub use analyzer::AnalyzerState;
pub use builder::BuilderState;
pub use library::{ContributeDraft, LibraryState};

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Generator,
    Library,
    Analyzer,
}

/// Everything a user can do in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    SwitchView { view: View },

    // Builder
    EditField { field: PromptField, value: String },
    AddKeyword { field: PromptField, keyword: String },
    ToggleStrictIdentity,
    SetReferenceImage { image: Option<ImagePayload> },
    Generate,
    ResetForm,
    Optimize,
    CopyPrompt,

    // Library
    SelectTemplate { id: Option<String> },
    CopyTemplate { id: String },
    OpenContribute,
    CloseContribute,
    SetDraftTitle { title: String },
    SetDraftCover { image: Option<ImagePayload> },
    SetDraftRawText { text: String },
    EditDraftField { field: PromptField, value: String },
    AutoFill,
    SaveTemplate,

    // Analyzer
    SelectAnalyzerImage { image: ImagePayload },
    Analyze,
    CopyAnalysis,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SwitchView { .. } => "switch_view",
            Action::EditField { .. } => "edit_field",
            Action::AddKeyword { .. } => "add_keyword",
            Action::ToggleStrictIdentity => "toggle_strict_identity",
            Action::SetReferenceImage { .. } => "set_reference_image",
            Action::Generate => "generate",
            Action::ResetForm => "reset_form",
            Action::Optimize => "optimize",
            Action::CopyPrompt => "copy_prompt",
            Action::SelectTemplate { .. } => "select_template",
            Action::CopyTemplate { .. } => "copy_template",
            Action::OpenContribute => "open_contribute",
            Action::CloseContribute => "close_contribute",
            Action::SetDraftTitle { .. } => "set_draft_title",
            Action::SetDraftCover { .. } => "set_draft_cover",
            Action::SetDraftRawText { .. } => "set_draft_raw_text",
            Action::EditDraftField { .. } => "edit_draft_field",
            Action::AutoFill => "auto_fill",
            Action::SaveTemplate => "save_template",
            Action::SelectAnalyzerImage { .. } => "select_analyzer_image",
            Action::Analyze => "analyze",
            Action::CopyAnalysis => "copy_analysis",
        }
    }
}

/// What the front end must do after a dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Put this text on the clipboard
    Copy(String),
    /// Run this service call, then `resolve` its reply
    Request(ServiceRequest),
}

/// A pending external service call, detached from the session
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest {
    AnalyzeImage(ImagePayload),
    ParseFreeText(String),
    Optimize(PromptSection),
}

impl ServiceRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceRequest::AnalyzeImage(_) => "analyze_image",
            ServiceRequest::ParseFreeText(_) => "parse_free_text",
            ServiceRequest::Optimize(_) => "optimize",
        }
    }

    pub async fn execute(&self, service: &dyn PromptService) -> ServiceReply {
        debug!(request = self.name(), service = service.name(), "Executing service request");
        match self {
            ServiceRequest::AnalyzeImage(image) => {
                ServiceReply::Analyzed {
                    image: image.clone(),
                    result: service.analyze_image(image).await,
                }
            }
            ServiceRequest::ParseFreeText(text) => {
                ServiceReply::Parsed(service.parse_free_text(text).await)
            }
            ServiceRequest::Optimize(section) => {
                ServiceReply::Optimized(service.optimize(section).await)
            }
        }
    }
}

/// Outcome of a ServiceRequest
#[derive(Debug)]
pub enum ServiceReply {
    /// Carries the image that was analyzed, which may no longer be selected
    Analyzed {
        image: ImagePayload,
        result: Result<PromptSection>,
    },
    Parsed(Result<ParsedPrompt>),
    Optimized(Result<PromptSection>),
}

/// Full UI state for one user
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    view: View,
    builder: BuilderState,
    library: LibraryState,
    analyzer: AnalyzerState,
}

impl Session {
    /// New session with the starter templates loaded
    pub fn new() -> Self {
        Self::with_store(TemplateStore::seeded())
    }

    pub fn with_store(store: TemplateStore) -> Self {
        Self {
            library: LibraryState::new(store),
            ..Self::default()
        }
    }

    /// Session whose builder starts with strict identity on
    pub fn with_strict_identity(mut self, strict: bool) -> Self {
        if self.builder.strict_identity() != strict {
            self.builder.toggle_strict_identity();
        }
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn builder(&self) -> &BuilderState {
        &self.builder
    }

    pub fn library(&self) -> &LibraryState {
        &self.library
    }

    pub fn analyzer(&self) -> &AnalyzerState {
        &self.analyzer
    }

    /// Apply an action. Errors leave the session exactly as it was.
    pub fn dispatch(&mut self, action: Action) -> Result<Effect> {
        debug!(action = action.name(), "Dispatching action");
        let effect = match action {
            Action::SwitchView { view } => {
                self.view = view;
                Effect::None
            }

            Action::EditField { field, value } => {
                self.builder.edit(field, value);
                Effect::None
            }
            Action::AddKeyword { field, keyword } => {
                self.builder.add_keyword(field, &keyword);
                Effect::None
            }
            Action::ToggleStrictIdentity => {
                self.builder.toggle_strict_identity();
                Effect::None
            }
            Action::SetReferenceImage { image } => {
                self.builder.set_reference_image(image);
                Effect::None
            }
            Action::Generate => {
                self.builder.generate();
                Effect::None
            }
            Action::ResetForm => {
                self.builder.reset();
                Effect::None
            }
            Action::Optimize => Effect::Request(ServiceRequest::Optimize(
                self.builder.begin_optimize()?,
            )),
            Action::CopyPrompt => Effect::Copy(self.builder.copy_text()?),

            Action::SelectTemplate { id } => {
                self.library.select(id)?;
                Effect::None
            }
            Action::CopyTemplate { id } => Effect::Copy(self.library.copy_text(&id)?),
            Action::OpenContribute => {
                self.library.set_contribute_open(true);
                Effect::None
            }
            Action::CloseContribute => {
                self.library.set_contribute_open(false);
                Effect::None
            }
            Action::SetDraftTitle { title } => {
                self.library.draft_mut().title = title;
                Effect::None
            }
            Action::SetDraftCover { image } => {
                self.library.draft_mut().cover = image;
                Effect::None
            }
            Action::SetDraftRawText { text } => {
                self.library.draft_mut().raw_text = text;
                Effect::None
            }
            Action::EditDraftField { field, value } => {
                self.library.edit_draft_field(field, value);
                Effect::None
            }
            Action::AutoFill => {
                Effect::Request(ServiceRequest::ParseFreeText(self.library.begin_auto_fill()?))
            }
            Action::SaveTemplate => {
                self.library.save()?;
                Effect::None
            }

            Action::SelectAnalyzerImage { image } => {
                self.analyzer.select_image(image);
                Effect::None
            }
            Action::Analyze => {
                Effect::Request(ServiceRequest::AnalyzeImage(self.analyzer.begin_analyze()?))
            }
            Action::CopyAnalysis => Effect::Copy(self.analyzer.copy_text()?),
        };
        Ok(effect)
    }

    /// Apply a service reply. Clears the matching in-flight flag whatever the
    /// outcome; a failed reply changes nothing else and is returned as the error.
    pub fn resolve(&mut self, reply: ServiceReply) -> Result<()> {
        let (name, result) = match reply {
            ServiceReply::Analyzed { image, result } => (
                "analyze_image",
                self.analyzer.finish_analyze(&image, result),
            ),
            ServiceReply::Parsed(r) => ("parse_free_text", self.library.finish_auto_fill(r)),
            ServiceReply::Optimized(r) => ("optimize", self.builder.finish_optimize(r)),
        };
        match &result {
            Ok(()) => info!(request = name, "Service reply applied"),
            Err(e) => warn!(request = name, error = %e, "Service request failed"),
        }
        result
    }

    /// Dispatch and, if needed, run the service call inline.
    ///
    /// Returns text to copy, if any. Only suitable where the caller owns the
    /// session exclusively for the whole call.
    pub async fn perform(
        &mut self,
        action: Action,
        service: &dyn PromptService,
    ) -> Result<Option<String>> {
        match self.dispatch(action)? {
            Effect::None => Ok(None),
            Effect::Copy(text) => Ok(Some(text)),
            Effect::Request(request) => {
                let reply = request.execute(service).await;
                self.resolve(reply)?;
                Ok(None)
            }
        }
    }
}
