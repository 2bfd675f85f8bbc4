pub const CAPTION_SYSTEM: &str = "You are a UGC creator writing short, authentic captions.";
pub const CAPTION_INTRO: &str = "Create a UGC-style social caption based on: \"{{prompt}}\".";
pub const CAPTION_SUFFIX: &str = " Use an authentic voice, light emojis, avoid forced hashtags.";

pub const SIZE_SQUARE: &str = "1024x1024";
pub const SIZE_PORTRAIT: &str = "1024x1792";
pub const SIZE_LANDSCAPE: &str = "1792x1024";

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the user prompt sent to the chat model for a caption request.
///
/// Optional clauses are appended in platform, tone, length order and only
/// when the value is non-empty.
pub fn build_caption_prompt(
    prompt: &str,
    platform: Option<&str>,
    tone: Option<&str>,
    length: Option<&str>,
) -> String {
    let mut result = render(CAPTION_INTRO, &[("prompt", prompt)]);
    for (label, value) in [("Platform", platform), ("Tone", tone), ("Length", length)] {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            result.push_str(&format!(" {}: {}.", label, value));
        }
    }
    result.push_str(CAPTION_SUFFIX);
    result
}

/// Map an aspect ratio name to an image generation size.
///
/// Matching is exact and case-sensitive; anything unrecognised is square.
pub fn map_aspect_to_size(aspect_ratio: Option<&str>) -> &'static str {
    match aspect_ratio {
        Some("portrait") => SIZE_PORTRAIT,
        Some("landscape") => SIZE_LANDSCAPE,
        _ => SIZE_SQUARE,
    }
}

/// Visual styles that bias image composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Selfie,
    Product,
    Demo,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Selfie, Style::Product, Style::Demo];

    pub fn name(self) -> &'static str {
        match self {
            Style::Selfie => "selfie",
            Style::Product => "product",
            Style::Demo => "demo",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Style::Selfie => "smartphone selfie, casual lighting, authentic, handheld perspective",
            Style::Product => "studio product shot, plain background, soft shadows, realistic",
            Style::Demo => "hands-on demo scene, natural setting, realistic lighting",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Style> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|style| style.name() == name)
    }
}

/// Append the hint for `style` to `prompt`. Unknown or absent styles leave
/// the prompt untouched.
pub fn add_style_hint(prompt: &str, style: Option<&str>) -> String {
    match style.and_then(Style::from_name) {
        Some(style) => format!("{}. {}", prompt, style.hint()),
        None => prompt.to_string(),
    }
}
