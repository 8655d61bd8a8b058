// src/llm/gemini/mod.rs
// Google Gemini API client

mod client;
mod extraction;
mod instructions;
pub mod types;

pub use client::{DEFAULT_MODEL, GEMINI_API_BASE, GeminiClient};
