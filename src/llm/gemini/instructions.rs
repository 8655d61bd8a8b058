// src/llm/gemini/instructions.rs
// Instruction texts and response schemas for the three prompt operations

use serde_json::{Value, json};

use crate::prompt::{PromptField, PromptSection};

pub const ANALYZE_INSTRUCTION: &str = "\
Analyze this cinematic or movie-style image and extract its details into the following \
8-part structured format for an image generation prompt:

1. Purpose: core goal and shot type (e.g. BTS selfie, long shot).
2.1 User Character: the first person, usually the reference subject.
2.2 Target Character: the second person (actor/character).
2.3 Interaction: how they pose or relate to each other.
3. Environment: the background and set details.
4. Lighting: light sources and color tone.
5. Style: rendering quality and photographic nature.
6. Negative: what to avoid.

Return ONLY a JSON object with keys: purpose, userPerson, targetCharacter, interaction, \
environment, lighting, style, negative.";

pub const PARSE_SYSTEM_INSTRUCTION: &str = "\
You are an expert prompt engineer. Decompose a raw image generation prompt into a fixed \
8-part structure and write a short, catchy, descriptive title for it \
(e.g. \"Neon Noir Alleyway\" or \"Victorian BTS Selfie\").

Structure keys:
- purpose: the core goal, shot type and composition.
- userPerson: the main human subject (Subject A).
- targetCharacter: the secondary/target character (Subject B).
- interaction: how the subjects interact or pose together.
- environment: the setting, background and props.
- lighting: light quality, sources and atmospheric effects.
- style: artistic style, camera settings and rendering quality.
- negative: things to exclude.

If a part is missing from the input, provide a reasonable default based on the context. \
Return ONLY valid JSON.";

pub fn parse_message(raw_text: &str) -> String {
    format!(
        "Please parse this prompt into the structured format and suggest a title: \"{}\"",
        raw_text
    )
}

pub fn optimize_message(section: &PromptSection) -> serde_json::Result<String> {
    Ok(format!(
        "Refine and improve this cinematic image prompt for better realism and detail. \
         Maintain the 8-part structure. Current prompt: {}",
        serde_json::to_string(section)?
    ))
}

/// Response schema with all eight fields required
pub fn section_schema() -> Value {
    let properties: serde_json::Map<String, Value> = PromptField::ALL
        .iter()
        .map(|f| (f.as_str().to_string(), json!({ "type": "STRING" })))
        .collect();
    let required: Vec<&str> = PromptField::ALL.iter().map(|f| f.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

/// Response schema for the parse operation: `{ title, prompt }`
pub fn parsed_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "A creative and relevant title for the template."
            },
            "prompt": section_schema(),
        },
        "required": ["title", "prompt"],
    })
}
