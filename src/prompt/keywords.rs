// src/prompt/keywords.rs
// Suggested keyword presets and append-if-absent augmentation

use super::schema::PromptField;

const PURPOSE: &[&str] = &[
    "Wide-angle selfie", "POV shot", "Close-up selfie", "Mirror selfie", "Arm-length shot",
    "Fisheye selfie", "Group selfie", "Rule of thirds", "Centered", "Dutch angle", "Eye-level",
    "Low-angle", "High-angle", "Candid shot", "Spontaneous moment", "Handheld camera shake",
    "Grainy film", "Raw photo", "Behind-the-scenes footage", "Film set photography",
    "Production still", "Making-of", "Unposed",
];

const USER_PERSON: &[&str] = &[
    "Strict identity preservation", "Zero facial modification", "Exact pixel-perfect match",
    "Unaltered skin texture", "Maintaining facial proportions", "No beauty filters",
    "Zero AI distortion", "True-to-life representation", "Original hair color",
    "Authentic height", "Individual moles/freckles", "Natural body shape",
];

const TARGET_CHARACTER: &[&str] = &[
    "In their prime", "Young version", "Aged version", "Wearing prosthetic makeup",
    "Iconic outfit", "Battle-scarred", "Covered in dust", "Formal tuxedo", "Period costume",
    "Tattered clothes", "High-fashion armor", "Smirking", "Intense gaze", "Winking",
    "Laughing out loud", "Stern expression", "Charismatic", "Villainous grin", "Heroic look",
];

const INTERACTION: &[&str] = &[
    "Arm around shoulder", "Hand on shoulder", "Back-to-back", "Shaking hands", "High-fiving",
    "Hugging", "Fist bump", "Leaning against a wall", "Holding a coffee cup",
    "Checking the phone", "Pointing at something", "Peace sign (V)", "Thumbs up", "Toasting",
    "Professional chemistry", "Friendly bond", "Rivalry vibe", "Mentor and protégé",
    "Comedic duo",
];

const ENVIRONMENT: &[&str] = &[
    "Soundstage", "Movie lot", "Location scouting", "Green screen", "Scaffolding", "Backstage",
    "Industrial warehouse", "Luxury penthouse", "Futuristic cockpit", "Medieval dungeon",
    "Ancient temple", "Deep forest", "Neon-lit city", "Camera rig", "Tripod",
    "Lighting stands", "Boom microphone", "Clapperboard", "Director's chair",
];

const LIGHTING: &[&str] = &[
    "Natural sunlight", "Harsh desert sun", "Soft diffused daylight", "Golden hour",
    "Blue hour", "Rim lighting", "Backlit", "Cinematic lighting", "Volumetric lighting",
    "Neon glow", "High-key lighting", "Low-key lighting", "Chiaroscuro", "Hazy", "Foggy",
    "Dusty atmosphere", "Rain-soaked", "Lens flare", "Soft bokeh",
];

const STYLE: &[&str] = &[
    "Photorealistic", "Hyper-realistic", "8k UHD", "Shot on 35mm film",
    "Shot on iPhone 15 Pro", "Detailed pores", "Sharp focus",
];

const NEGATIVE: &[&str] = &[
    "CGI", "3D render", "Cartoon", "Anime", "Oil painting", "Concept art", "Illustration",
    "Digital art", "Sketch", "Watermark", "Logo", "Text", "Signature", "Deformed hands",
    "Extra fingers", "Blurred face", "Plastic skin", "Oversaturated", "Bad anatomy",
    "Double heads", "Low resolution",
];

/// Suggested keywords for a field, in display order
pub fn presets(field: PromptField) -> &'static [&'static str] {
    match field {
        PromptField::Purpose => PURPOSE,
        PromptField::UserPerson => USER_PERSON,
        PromptField::TargetCharacter => TARGET_CHARACTER,
        PromptField::Interaction => INTERACTION,
        PromptField::Environment => ENVIRONMENT,
        PromptField::Lighting => LIGHTING,
        PromptField::Style => STYLE,
        PromptField::Negative => NEGATIVE,
    }
}

/// Append `keyword` to a field value unless it is already present.
///
/// Blank input yields the keyword alone. Presence is a case-insensitive
/// substring check against `current` as given (untrimmed), so applying the
/// same keyword twice is a no-op even when it carries padding.
pub fn append_keyword(current: &str, keyword: &str) -> String {
    let trimmed = current.trim();
    if trimmed.is_empty() {
        return keyword.to_string();
    }
    if current.to_lowercase().contains(&keyword.to_lowercase()) {
        return current.to_string();
    }
    format!("{}, {}", trimmed, keyword)
}
