// src/prompt/schema.rs
// The fixed 8-section cinematic prompt schema

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight canonical prompt sections, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PromptField {
    Purpose,
    UserPerson,
    TargetCharacter,
    Interaction,
    Environment,
    Lighting,
    Style,
    Negative,
}

impl PromptField {
    /// All fields in canonical order
    pub const ALL: [PromptField; 8] = [
        Self::Purpose,
        Self::UserPerson,
        Self::TargetCharacter,
        Self::Interaction,
        Self::Environment,
        Self::Lighting,
        Self::Style,
        Self::Negative,
    ];

    /// Wire name, as used by the external service and saved templates
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purpose => "purpose",
            Self::UserPerson => "userPerson",
            Self::TargetCharacter => "targetCharacter",
            Self::Interaction => "interaction",
            Self::Environment => "environment",
            Self::Lighting => "lighting",
            Self::Style => "style",
            Self::Negative => "negative",
        }
    }

    /// Parse a wire name; also accepts snake_case and is case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().to_lowercase() == normalized)
    }

    /// Form label in the builder screen
    pub fn label(&self) -> &'static str {
        match self {
            Self::Purpose => "1. Format & Composition",
            Self::UserPerson => "2.1 Subject A (reference person)",
            Self::TargetCharacter => "2.2 Subject B (character/actor)",
            Self::Interaction => "2.3 Interaction & Pose",
            Self::Environment => "3. Context & Setting",
            Self::Lighting => "4. Lighting & Atmosphere",
            Self::Style => "5. Style & Quality",
            Self::Negative => "6. Negative Prompt",
        }
    }
}

impl fmt::Display for PromptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured representation of a cinematic prompt.
///
/// The field set is closed; serde rejects payloads that omit any of the eight
/// fields, so a malformed service response never half-populates a section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSection {
    pub purpose: String,
    pub user_person: String,
    pub target_character: String,
    pub interaction: String,
    pub environment: String,
    pub lighting: String,
    pub style: String,
    pub negative: String,
}

impl PromptSection {
    /// Initial/reset state: every field empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Placeholder text and formatting fallback source
    pub fn example() -> Self {
        Self {
            purpose: "A photorealistic, candid, behind-the-scenes (BTS) long shot selfie, taken on a film set.".into(),
            user_person: "The person from the Character Reference Image, maintaining their real face, body, hairstyle, and proportions.".into(),
            target_character: "[Al Pacino] as [Tony Montana], depicted as a young man in his late 30s, wearing his iconic signature suit.".into(),
            interaction: "Both are posing naturally and casually for the selfie, standing directly next to each other.".into(),
            environment: "The background reflects the iconic set from [Tony Montana's Mansion].".into(),
            lighting: "Natural, slightly hot lighting, with cinematic softness.".into(),
            style: "Photorealistic, high-detail, genuine behind-the-scenes photo.".into(),
            negative: "Not stylized, not painted, not concept art, no fantasy elements, no text overlays.".into(),
        }
    }

    pub fn get(&self, field: PromptField) -> &str {
        match field {
            PromptField::Purpose => &self.purpose,
            PromptField::UserPerson => &self.user_person,
            PromptField::TargetCharacter => &self.target_character,
            PromptField::Interaction => &self.interaction,
            PromptField::Environment => &self.environment,
            PromptField::Lighting => &self.lighting,
            PromptField::Style => &self.style,
            PromptField::Negative => &self.negative,
        }
    }

    pub fn set(&mut self, field: PromptField, value: impl Into<String>) {
        let slot = match field {
            PromptField::Purpose => &mut self.purpose,
            PromptField::UserPerson => &mut self.user_person,
            PromptField::TargetCharacter => &mut self.target_character,
            PromptField::Interaction => &mut self.interaction,
            PromptField::Environment => &mut self.environment,
            PromptField::Lighting => &mut self.lighting,
            PromptField::Style => &mut self.style,
            PromptField::Negative => &mut self.negative,
        };
        *slot = value.into();
    }

    /// (field, value) pairs in canonical order
    pub fn entries(&self) -> impl Iterator<Item = (PromptField, &str)> {
        PromptField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// True when every field is blank after trimming
    pub fn is_blank(&self) -> bool {
        self.entries().all(|(_, v)| v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_is_canonical() {
        let names: Vec<&str> = PromptField::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "purpose",
                "userPerson",
                "targetCharacter",
                "interaction",
                "environment",
                "lighting",
                "style",
                "negative"
            ]
        );
    }

    #[test]
    fn test_field_parse() {
        assert_eq!(PromptField::parse("userPerson"), Some(PromptField::UserPerson));
        assert_eq!(PromptField::parse("user_person"), Some(PromptField::UserPerson));
        assert_eq!(PromptField::parse("TARGET-CHARACTER"), Some(PromptField::TargetCharacter));
        assert_eq!(PromptField::parse("camera"), None);
    }

    #[test]
    fn test_empty_is_blank() {
        assert!(PromptSection::empty().is_blank());
        assert!(!PromptSection::example().is_blank());
    }

    #[test]
    fn test_get_set_every_field() {
        let mut section = PromptSection::empty();
        for field in PromptField::ALL {
            section.set(field, field.as_str().to_uppercase());
        }
        for (field, value) in section.entries() {
            assert_eq!(value, field.as_str().to_uppercase());
        }
    }

    #[test]
    fn test_serializes_camel_case_in_order() {
        let json = serde_json::to_string(&PromptSection::empty()).unwrap();
        assert_eq!(
            json,
            r#"{"purpose":"","userPerson":"","targetCharacter":"","interaction":"","environment":"","lighting":"","style":"","negative":""}"#
        );
    }

    #[test]
    fn test_deserialize_rejects_missing_field() {
        let partial = r#"{"purpose":"x","userPerson":"y"}"#;
        assert!(serde_json::from_str::<PromptSection>(partial).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut live = PromptSection::example();
        let saved = live.clone();
        live.set(PromptField::Purpose, "changed");
        assert_eq!(saved.purpose, PromptSection::example().purpose);
    }
}
