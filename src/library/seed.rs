// src/library/seed.rs
// Starter templates shown in a fresh library

use crate::prompt::PromptSection;

use super::store::Template;

/// The two starter templates, newest first
pub fn starter_templates() -> Vec<Template> {
    let scarface = PromptSection::example();
    let dark_knight = PromptSection {
        target_character: "[Christian Bale] as [Batman], breaking character slightly with a grin."
            .into(),
        environment: "A dark, wet alleyway in Gotham.".into(),
        ..PromptSection::example()
    };

    vec![
        Template::new(
            "Scarface BTS",
            "https://images.unsplash.com/photo-1598449356475-b9f71db7d847?q=80&w=800&auto=format&fit=crop",
            scarface,
        ),
        Template::new(
            "Dark Knight BTS",
            "https://images.unsplash.com/photo-1478720568477-152d9b164e26?q=80&w=800&auto=format&fit=crop",
            dark_knight,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::format_display;

    #[test]
    fn test_starters_are_complete() {
        for template in starter_templates() {
            assert!(!template.title().is_empty());
            assert!(template.image_url().starts_with("https://"));
            assert!(!template.prompt().purpose.is_empty());
            assert_eq!(template.full_prompt(), format_display(template.prompt()));
        }
    }

    #[test]
    fn test_dark_knight_overrides() {
        let starters = starter_templates();
        assert!(starters[1].prompt().target_character.contains("Batman"));
        assert_eq!(starters[1].prompt().lighting, PromptSection::example().lighting);
    }
}
