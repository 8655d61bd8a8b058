// src/studio/render.rs
// Plain-text rendering of the three screens

use std::fmt::Write;

use crate::prompt::{PromptField, PromptSection, presets};
use crate::session::{Session, View};

fn section_lines(out: &mut String, section: &PromptSection) {
    for (field, value) in section.entries() {
        let shown = if value.trim().is_empty() { "-" } else { value };
        let _ = writeln!(out, "  {:<34} {}", field.label(), shown);
    }
}

pub fn generator(session: &Session) -> String {
    let builder = session.builder();
    let mut out = String::from("== Prompt Generator ==\n");
    section_lines(&mut out, builder.form());
    let _ = writeln!(
        out,
        "\n  strict identity: {}   reference image: {}",
        if builder.strict_identity() { "on" } else { "off" },
        builder
            .reference_image()
            .map(|i| format!("{} ({} bytes)", i.mime_type(), i.len()))
            .unwrap_or_else(|| "none".into())
    );
    if builder.is_optimizing() {
        out.push_str("  optimizing...\n");
    }
    if let Some(prompt) = builder.final_prompt() {
        let _ = write!(out, "\n{}\n", prompt);
    }
    out
}

pub fn library(session: &Session) -> String {
    let library = session.library();
    let mut out = String::from("== Template Library ==\n");

    if library.is_contribute_open() {
        let draft = library.draft();
        out.push_str("-- Contribute --\n");
        let _ = writeln!(out, "  title: {}", if draft.title.is_empty() { "-" } else { draft.title.as_str() });
        let _ = writeln!(
            out,
            "  cover: {}",
            draft.cover.as_ref().map(|c| c.mime_type()).unwrap_or("none")
        );
        let _ = writeln!(out, "  pasted text: {} chars", draft.raw_text.chars().count());
        if draft.parsing {
            out.push_str("  auto-filling...\n");
        }
        section_lines(&mut out, &draft.prompt);
        return out;
    }

    if let Some(template) = library.selected() {
        let _ = writeln!(out, "-- {} --\n{}", template.title(), template.full_prompt());
        return out;
    }

    for (i, template) in library.templates().list().iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}  [{}]", i + 1, template.title(), template.id());
    }
    out
}

pub fn analyzer(session: &Session) -> String {
    let analyzer = session.analyzer();
    let mut out = String::from("== Image Analyzer ==\n");
    match analyzer.image() {
        Some(image) => {
            let _ = writeln!(out, "  image: {} ({} bytes)", image.mime_type(), image.len());
        }
        None => out.push_str("  no image selected\n"),
    }
    if analyzer.is_analyzing() {
        out.push_str("  analyzing...\n");
    }
    if let Some(result) = analyzer.result() {
        section_lines(&mut out, result);
    }
    out
}

pub fn screen(session: &Session) -> String {
    match session.view() {
        View::Generator => generator(session),
        View::Library => library(session),
        View::Analyzer => analyzer(session),
    }
}

pub fn keyword_list(field: PromptField) -> String {
    let mut out = format!("{}:\n", field.label());
    for (i, keyword) in presets(field).iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, keyword);
    }
    out
}
