// src/library/mod.rs
// Template library

pub mod seed;
pub mod store;

pub use store::{Template, TemplateStore};
