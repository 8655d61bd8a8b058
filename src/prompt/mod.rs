// src/prompt/mod.rs
// Prompt schema, formatting and keyword augmentation

pub mod formatter;
pub mod keywords;
pub mod schema;

pub use formatter::{
    FormatOptions, IDENTITY_FALLBACK, STRICT_IDENTITY_CLAUSE, format_display, format_prompt,
};
pub use keywords::{append_keyword, presets};
pub use schema::{PromptField, PromptSection};
