// src/studio/mod.rs
// Interactive terminal studio over one Session

mod colors;
pub mod commands;
pub mod render;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::clipboard::Clipboard;
use crate::error::{PromptError, Result};
use crate::image::ImagePayload;
use crate::llm::PromptService;
use crate::prompt::presets;
use crate::session::{Action, Session, View};

pub use commands::{Command, KeywordArg, TemplateRef};

/// What the loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// Command interpreter; owns the session exclusively
pub struct Studio<C: Clipboard> {
    session: Session,
    service: Arc<dyn PromptService>,
    clipboard: C,
}

impl<C: Clipboard> Studio<C> {
    pub fn new(session: Session, service: Arc<dyn PromptService>, clipboard: C) -> Self {
        Self {
            session,
            service,
            clipboard,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Parse and run one line
    pub async fn handle_line(&mut self, line: &str) -> Result<Reply> {
        let command = Command::parse(line)?;
        debug!(command = ?command, "Studio command");
        self.execute(command).await
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply> {
        let action = match command {
            Command::Quit => return Ok(Reply::Quit),
            Command::Help => return Ok(Reply::Output(commands::HELP.to_string())),
            Command::Show => return Ok(self.screen()),
            Command::Keywords(field) => return Ok(Reply::Output(render::keyword_list(field))),
            Command::Copy => return self.copy().await,

            Command::View(view) => Action::SwitchView { view },
            Command::Set(field, value) => Action::EditField { field, value },
            Command::AddKeyword(field, keyword) => {
                let keyword = match keyword {
                    KeywordArg::Text(text) => text,
                    KeywordArg::Preset(n) => n
                        .checked_sub(1)
                        .and_then(|i| presets(field).get(i))
                        .map(|k| k.to_string())
                        .ok_or_else(|| {
                            PromptError::Validation(format!("preset number 1-{}", presets(field).len()))
                        })?,
                };
                Action::AddKeyword { field, keyword }
            }
            Command::Strict => Action::ToggleStrictIdentity,
            Command::Reference(path) => Action::SetReferenceImage {
                image: load_optional(path).await?,
            },
            Command::Generate => Action::Generate,
            Command::Reset => Action::ResetForm,
            Command::Optimize => Action::Optimize,

            Command::Open(reference) => Action::SelectTemplate {
                id: Some(self.resolve_template(reference)?),
            },
            Command::Close => Action::SelectTemplate { id: None },
            Command::New => Action::OpenContribute,
            Command::Title(title) => Action::SetDraftTitle { title },
            Command::Cover(path) => Action::SetDraftCover {
                image: load_optional(path).await?,
            },
            Command::Paste(text) => Action::SetDraftRawText { text },
            Command::Draft(field, value) => Action::EditDraftField { field, value },
            Command::AutoFill => Action::AutoFill,
            Command::Save => Action::SaveTemplate,
            Command::Cancel => Action::CloseContribute,

            Command::Image(path) => Action::SelectAnalyzerImage {
                image: ImagePayload::load(path).await?,
            },
            Command::Analyze => Action::Analyze,
        };

        // Screen-specific actions also bring their screen forward
        if let Some(view) = screen_of(&action)
            && view != self.session.view()
        {
            self.session.dispatch(Action::SwitchView { view })?;
        }

        self.session.perform(action, self.service.as_ref()).await?;
        Ok(self.screen())
    }

    fn screen(&self) -> Reply {
        Reply::Output(render::screen(&self.session))
    }

    /// Copy whatever the current screen shows
    async fn copy(&mut self) -> Result<Reply> {
        let action = match self.session.view() {
            View::Generator => Action::CopyPrompt,
            View::Analyzer => Action::CopyAnalysis,
            View::Library => {
                let template = self.session.library().selected().ok_or_else(|| {
                    PromptError::Validation("open a template before copying".into())
                })?;
                Action::CopyTemplate {
                    id: template.id().to_string(),
                }
            }
        };
        let text = self
            .session
            .perform(action, self.service.as_ref())
            .await?
            .unwrap_or_default();
        self.clipboard.copy(&text)?;
        Ok(Reply::Output(format!("Copied {} characters.", text.chars().count())))
    }

    fn resolve_template(&self, reference: TemplateRef) -> Result<String> {
        match reference {
            TemplateRef::Id(id) => Ok(id),
            TemplateRef::Index(n) => n
                .checked_sub(1)
                .and_then(|i| self.session.library().templates().list().get(i).map(|t| t.id().to_string()))
                .ok_or_else(|| PromptError::Validation(format!("template number, got {}", n))),
        }
    }
}

async fn load_optional(path: Option<PathBuf>) -> Result<Option<ImagePayload>> {
    match path {
        Some(path) => Ok(Some(ImagePayload::load(path).await?)),
        None => Ok(None),
    }
}

fn screen_of(action: &Action) -> Option<View> {
    match action {
        Action::SwitchView { .. } => None,
        Action::EditField { .. }
        | Action::AddKeyword { .. }
        | Action::ToggleStrictIdentity
        | Action::SetReferenceImage { .. }
        | Action::Generate
        | Action::ResetForm
        | Action::Optimize
        | Action::CopyPrompt => Some(View::Generator),
        Action::SelectAnalyzerImage { .. } | Action::Analyze | Action::CopyAnalysis => {
            Some(View::Analyzer)
        }
        _ => Some(View::Library),
    }
}

/// Readline front end around a Studio
pub struct Repl<C: Clipboard> {
    studio: Studio<C>,
    editor: DefaultEditor,
    history_path: PathBuf,
}

impl<C: Clipboard> Repl<C> {
    pub fn new(studio: Studio<C>) -> anyhow::Result<Self> {
        let history_path = dirs::home_dir()
            .unwrap_or_default()
            .join(".cineprompt")
            .join("studio_history");

        Ok(Self {
            studio,
            editor: DefaultEditor::new()?,
            history_path,
        })
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        if self.history_path.exists() {
            let _ = self.editor.load_history(&self.history_path);
        }

        println!("cineprompt studio v{}", env!("CARGO_PKG_VERSION"));
        println!("{}", colors::status("Type 'help' for commands, Ctrl+D to exit."));
        println!();
        println!("{}", render::screen(self.studio.session()));

        while let Some(line) = self.read_input()? {
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history_entry(line.as_str())?;

            match self.studio.handle_line(&line).await {
                Ok(Reply::Quit) => break,
                Ok(Reply::Output(text)) => println!("{}", text),
                Err(e) if e.is_user_input() => println!("{}", colors::error(&e.to_user_string())),
                Err(e) => println!("{}", colors::warning(&e.to_user_string())),
            }
        }

        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = self.editor.save_history(&self.history_path);
        println!("{}", colors::success("Goodbye!"));
        Ok(())
    }

    /// Read one command. A line starting with `"""` opens a block that runs
    /// until the closing `"""`, for pasting multi-line prompts.
    fn read_input(&mut self) -> anyhow::Result<Option<String>> {
        let view = match self.studio.session().view() {
            View::Generator => "generator",
            View::Library => "library",
            View::Analyzer => "analyzer",
        };
        let first = match self.editor.readline(&colors::prompt(view)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => return Ok(Some(String::new())),
            Err(ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let Some((head, after)) = first.split_once("\"\"\"") else {
            return Ok(Some(first));
        };
        if let Some(body) = after.strip_suffix("\"\"\"") {
            return Ok(Some(format!("{}{}", head, body)));
        }

        let mut lines = vec![after.to_string()];
        loop {
            match self.editor.readline(&colors::continuation_prompt()) {
                Ok(line) => {
                    if let Some(last) = line.trim_end().strip_suffix("\"\"\"") {
                        lines.push(last.to_string());
                        break;
                    }
                    lines.push(line);
                }
                Err(ReadlineError::Interrupted) => return Ok(Some(String::new())),
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
        let body = lines.join("\n");
        Ok(Some(format!("{}{}", head, body.trim_matches('\n'))))
    }
}
