// src/studio/commands.rs
// Studio command-line parsing

use std::path::PathBuf;

use crate::error::{PromptError, Result};
use crate::prompt::PromptField;
use crate::session::View;

/// Reference to a template: 1-based list position or id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateRef {
    Index(usize),
    Id(String),
}

/// Keyword given by preset number or literal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordArg {
    Preset(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Show,
    View(View),

    // Builder
    Set(PromptField, String),
    Keywords(PromptField),
    AddKeyword(PromptField, KeywordArg),
    Strict,
    Reference(Option<PathBuf>),
    Generate,
    Reset,
    Optimize,
    Copy,

    // Library
    Open(TemplateRef),
    Close,
    New,
    Title(String),
    Cover(Option<PathBuf>),
    Paste(String),
    Draft(PromptField, String),
    AutoFill,
    Save,
    Cancel,

    // Analyzer
    Image(PathBuf),
    Analyze,
}

pub const HELP: &str = "\
Commands:
  help                     Show this help
  view <generator|library|analyzer>
  show                     Show the current screen
  quit                     Exit

Generator:
  set <field> <text>       Replace a field (empty text clears it)
  kw <field>               List keyword presets for a field
  kw <field> <n|text>      Append a preset or keyword
  strict                   Toggle strict identity mode
  ref <path|none>          Set or clear the reference image
  generate                 Build the final prompt
  reset                    Clear the form
  optimize                 Refine the form with the prompt service
  copy                     Copy the current prompt / template / analysis

Library:
  open <n|id>              Show a template
  close                    Back to the list
  new                      Open the contribute form
  title <text>             Draft title
  cover <path|none>        Draft cover image
  paste <text>             Raw prompt text for auto-fill (use \"\"\" for multi-line)
  draft <field> <text>     Edit a draft field
  autofill                 Parse the pasted text into fields
  save                     Publish the draft
  cancel                   Close the contribute form

Analyzer:
  image <path>             Select an image
  analyze                  Reverse-engineer its prompt

Fields: purpose, userPerson, targetCharacter, interaction, environment, lighting, style, negative";

fn parse_view(arg: &str) -> Result<View> {
    match arg.to_lowercase().as_str() {
        "generator" | "builder" | "g" => Ok(View::Generator),
        "library" | "l" => Ok(View::Library),
        "analyzer" | "a" => Ok(View::Analyzer),
        _ => Err(PromptError::Validation(format!(
            "view (generator, library or analyzer), got '{}'",
            arg
        ))),
    }
}

fn parse_field(arg: &str) -> Result<PromptField> {
    PromptField::parse(arg).ok_or_else(|| PromptError::Validation(format!("field name, got '{}'", arg)))
}

fn require<'a>(arg: &'a str, what: &str) -> Result<&'a str> {
    if arg.is_empty() {
        Err(PromptError::Validation(what.to_string()))
    } else {
        Ok(arg)
    }
}

fn optional_path(arg: &str, what: &str) -> Result<Option<PathBuf>> {
    match require(arg, what)? {
        "none" | "clear" => Ok(None),
        path => Ok(Some(PathBuf::from(path))),
    }
}

/// Split `<field> <rest>` where rest may be empty
fn field_and_rest(arg: &str) -> Result<(PromptField, String)> {
    let (field, rest) = arg.split_once(char::is_whitespace).unwrap_or((arg, ""));
    Ok((parse_field(require(field, "field name")?)?, rest.trim().to_string()))
}

impl Command {
    /// Parse one input line. A leading `/` is accepted and ignored.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let (name, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let arg = arg.trim();

        let command = match name.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "show" | "ls" => Command::Show,
            "view" => Command::View(parse_view(require(arg, "view name")?)?),

            "set" => {
                let (field, value) = field_and_rest(arg)?;
                Command::Set(field, value)
            }
            "kw" | "keyword" => {
                let (field, value) = field_and_rest(arg)?;
                if value.is_empty() {
                    Command::Keywords(field)
                } else if let Ok(n) = value.parse::<usize>() {
                    Command::AddKeyword(field, KeywordArg::Preset(n))
                } else {
                    Command::AddKeyword(field, KeywordArg::Text(value))
                }
            }
            "strict" => Command::Strict,
            "ref" => Command::Reference(optional_path(arg, "reference image path or 'none'")?),
            "generate" | "gen" => Command::Generate,
            "reset" => Command::Reset,
            "optimize" => Command::Optimize,
            "copy" => Command::Copy,

            "open" => {
                let arg = require(arg, "template number or id")?;
                match arg.parse::<usize>() {
                    Ok(n) => Command::Open(TemplateRef::Index(n)),
                    Err(_) => Command::Open(TemplateRef::Id(arg.to_string())),
                }
            }
            "close" => Command::Close,
            "new" | "contribute" => Command::New,
            "title" => Command::Title(arg.to_string()),
            "cover" => Command::Cover(optional_path(arg, "cover image path or 'none'")?),
            "paste" => Command::Paste(arg.to_string()),
            "draft" => {
                let (field, value) = field_and_rest(arg)?;
                Command::Draft(field, value)
            }
            "autofill" | "auto-fill" => Command::AutoFill,
            "save" => Command::Save,
            "cancel" => Command::Cancel,

            "image" => Command::Image(PathBuf::from(require(arg, "image path")?)),
            "analyze" => Command::Analyze,

            other => {
                return Err(PromptError::Validation(format!(
                    "a known command, got '{}' (type 'help')",
                    other
                )));
            }
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(Command::parse("help").unwrap(), Command::Help);
        assert_eq!(Command::parse("/generate").unwrap(), Command::Generate);
        assert_eq!(Command::parse("  gen ").unwrap(), Command::Generate);
        assert_eq!(Command::parse("view lib").ok(), None);
        assert_eq!(Command::parse("view library").unwrap(), Command::View(View::Library));
    }

    #[test]
    fn test_parse_set_keeps_text() {
        assert_eq!(
            Command::parse("set lighting Golden hour, rim light").unwrap(),
            Command::Set(PromptField::Lighting, "Golden hour, rim light".into())
        );
        assert_eq!(
            Command::parse("set target_character").unwrap(),
            Command::Set(PromptField::TargetCharacter, String::new())
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(
            Command::parse("kw style").unwrap(),
            Command::Keywords(PromptField::Style)
        );
        assert_eq!(
            Command::parse("kw style 3").unwrap(),
            Command::AddKeyword(PromptField::Style, KeywordArg::Preset(3))
        );
        assert_eq!(
            Command::parse("kw style Film grain").unwrap(),
            Command::AddKeyword(PromptField::Style, KeywordArg::Text("Film grain".into()))
        );
    }

    #[test]
    fn test_parse_paths() {
        assert_eq!(Command::parse("ref none").unwrap(), Command::Reference(None));
        assert_eq!(
            Command::parse("cover ./shot.png").unwrap(),
            Command::Cover(Some(PathBuf::from("./shot.png")))
        );
        assert!(Command::parse("image").is_err());
    }

    #[test]
    fn test_parse_open() {
        assert_eq!(Command::parse("open 2").unwrap(), Command::Open(TemplateRef::Index(2)));
        assert_eq!(
            Command::parse("open abc-123").unwrap(),
            Command::Open(TemplateRef::Id("abc-123".into()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse("bogus"), Err(PromptError::Validation(_))));
        assert!(matches!(Command::parse("set colour red"), Err(PromptError::Validation(_))));
    }
}
