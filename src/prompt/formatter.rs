// src/prompt/formatter.rs
// Serialization of a PromptSection into the six-block prompt text
//
// Two layouts exist. The builder layout substitutes example text for blank
// fields and can inject the strict identity clause; the display layout used by
// the library and analyzer prints values verbatim. Saved templates were rendered
// with the display layout, so the two must not be merged.

use super::schema::PromptSection;

/// Prefix injected before Subject A when strict identity mode is on
pub const STRICT_IDENTITY_CLAUSE: &str = "[CRITICAL CONSTRAINT: Maintain absolute pixel-perfect identity of Subject A from the reference image. NO facial modification, NO skin smoothing, NO age changes, and NO AI distortion of their unique features.]";

/// Subject A fallback when the field is blank
pub const IDENTITY_FALLBACK: &str = "Maintain identity from reference image";

/// Section markers of the builder layout, in order
pub const BUILDER_MARKERS: [&str; 6] = [
    "[1. Purpose & Shot Type]",
    "[2. Characters]",
    "[3. Environment & Setting]",
    "[4. Lighting & Atmosphere]",
    "[5. Style & Quality]",
    "[6. Negative Constraints]",
];

/// Section markers of the display layout, in order
pub const DISPLAY_MARKERS: [&str; 6] = [
    "[1. Purpose]",
    "[2. Characters]",
    "[3. Environment]",
    "[4. Lighting]",
    "[5. Style]",
    "[6. Negative]",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub strict_identity: bool,
}

impl FormatOptions {
    pub fn strict(strict_identity: bool) -> Self {
        Self { strict_identity }
    }
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Render the builder layout with per-field fallbacks
pub fn format_prompt(section: &PromptSection, options: FormatOptions) -> String {
    let example = PromptSection::example();
    let identity = if options.strict_identity {
        format!("{} ", STRICT_IDENTITY_CLAUSE)
    } else {
        String::new()
    };

    format!(
        "{} {}\n\n{}\n2.1 User Control (Subject A): {}{}\n2.2 Target Character (Subject B): {}\n2.3 Interaction: {}\n\n{} {}\n\n{} {}\n\n{} {}\n\n{} {}",
        BUILDER_MARKERS[0],
        or_fallback(&section.purpose, &example.purpose),
        BUILDER_MARKERS[1],
        identity,
        or_fallback(&section.user_person, IDENTITY_FALLBACK),
        or_fallback(&section.target_character, &example.target_character),
        or_fallback(&section.interaction, &example.interaction),
        BUILDER_MARKERS[2],
        or_fallback(&section.environment, &example.environment),
        BUILDER_MARKERS[3],
        or_fallback(&section.lighting, &example.lighting),
        BUILDER_MARKERS[4],
        or_fallback(&section.style, &example.style),
        BUILDER_MARKERS[5],
        or_fallback(&section.negative, &example.negative),
    )
}

/// Render the display layout; values are printed verbatim, blanks included
pub fn format_display(section: &PromptSection) -> String {
    format!(
        "{} {}\n\n{}\n2.1 User: {}\n2.2 Target: {}\n2.3 Interaction: {}\n\n{} {}\n\n{} {}\n\n{} {}\n\n{} {}",
        DISPLAY_MARKERS[0],
        section.purpose,
        DISPLAY_MARKERS[1],
        section.user_person,
        section.target_character,
        section.interaction,
        DISPLAY_MARKERS[2],
        section.environment,
        DISPLAY_MARKERS[3],
        section.lighting,
        DISPLAY_MARKERS[4],
        section.style,
        DISPLAY_MARKERS[5],
        section.negative,
    )
}
