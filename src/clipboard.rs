// src/clipboard.rs
// Copy formatted prompt text to the system clipboard

use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::error::{PromptError, Result};

/// Destination for "copy to clipboard" effects
pub trait Clipboard: Send {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Platform clipboard via the usual command-line helpers
#[derive(Debug, Default)]
pub struct SystemClipboard;

type Helper = (&'static str, &'static [&'static str]);

const MACOS_HELPERS: &[Helper] = &[("pbcopy", &[])];
const WINDOWS_HELPERS: &[Helper] = &[("clip", &[])];
const UNIX_HELPERS: &[Helper] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl SystemClipboard {
    fn candidates() -> &'static [Helper] {
        if cfg!(target_os = "macos") {
            MACOS_HELPERS
        } else if cfg!(target_os = "windows") {
            WINDOWS_HELPERS
        } else {
            UNIX_HELPERS
        }
    }

    fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        // Close stdin and reap the helper before reporting a write failure
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;
        Ok(status.success())
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        for (program, args) in Self::candidates() {
            match Self::pipe_to(program, args, text) {
                Ok(true) => {
                    debug!(program, chars = text.len(), "Copied to clipboard");
                    return Ok(());
                }
                Ok(false) => warn!(program, "Clipboard helper exited with failure"),
                Err(e) => debug!(program, error = %e, "Clipboard helper unavailable"),
            }
        }
        Err(PromptError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no clipboard helper found (pbcopy, clip, wl-copy, xclip or xsel)",
        )))
    }
}

/// Clipboard that keeps copied text in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.copy("[1. Purpose] x").unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some("[1. Purpose] x"));
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_reaps_helper_that_exits_early() {
        // `true` exits without reading stdin; a large write hits a broken pipe
        let text = "x".repeat(1 << 20);
        match SystemClipboard::pipe_to("true", &[], &text) {
            Ok(success) => assert!(success),
            Err(e) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
        }
    }

    #[test]
    fn test_system_candidates_not_empty() {
        assert!(!SystemClipboard::candidates().is_empty());
    }
}
