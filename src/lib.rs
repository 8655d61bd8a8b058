// src/lib.rs
// cineprompt - cinematic prompt builder, template library and image analyzer

pub mod clipboard;
pub mod config;
pub mod error;
pub mod http;
pub mod image;
pub mod library;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod studio;
pub mod web;

pub use error::{PromptError, Result};
