// src/studio/colors.rs
// ANSI helpers for studio output

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

use ansi::*;

pub fn success(msg: &str) -> String {
    format!("{}{}{}", GREEN, msg, RESET)
}

pub fn error(msg: &str) -> String {
    format!("{}{}{}", RED, msg, RESET)
}

/// Retry-later failures (service down, busy)
pub fn warning(msg: &str) -> String {
    format!("{}{}{}", YELLOW, msg, RESET)
}

pub fn status(msg: &str) -> String {
    format!("{}{}{}", DIM, msg, RESET)
}

/// Prompt showing the active view
pub fn prompt(view: &str) -> String {
    format!("{}{}{}> {}", BOLD, MAGENTA, view, RESET)
}

pub fn continuation_prompt() -> String {
    format!("{}{}... {}", BOLD, MAGENTA, RESET)
}
