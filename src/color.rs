use crate::normalize::slugify;
use palette::{FromColor, Hsv, RgbHue, Srgb};
use rustc_hash::FxHasher;
use std::hash::Hasher;

pub const NOTE_COLOR: &str = "#71aaeb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCategory {
    Basic,
    Custom,
    Binary,
}

impl SourceCategory {
    // Distinct salts keep a name shared across categories from landing on
    // the same derived color.
    fn salt(self) -> &'static str {
        match self {
            SourceCategory::Basic => "rating",
            SourceCategory::Custom => "field",
            SourceCategory::Binary => "answer",
        }
    }

    fn palette(self) -> &'static [&'static str] {
        match self {
            SourceCategory::Basic => &[],
            SourceCategory::Custom => CUSTOM_PALETTE,
            SourceCategory::Binary => BINARY_PALETTE,
        }
    }
}

const KNOWN_METRICS: &[(&str, &str)] = &[
    ("mood", "#e05263"),
    ("sleep", "#5b6ee1"),
    ("energy", "#f2a03d"),
    ("stress", "#b04ae0"),
    ("anxiety", "#8a6d4f"),
    ("productivity", "#2d9c6f"),
    ("настроение", "#e05263"),
    ("сон", "#5b6ee1"),
    ("энергия", "#f2a03d"),
];

const CUSTOM_PALETTE: &[&str] = &[
    "#ff6b4a", "#2f4858", "#2d7a4b", "#c63b2b", "#7a5de8", "#1f8a9e", "#b8813a", "#d64f8e",
];

const BINARY_PALETTE: &[&str] = &[
    "#4a8f5d", "#a34a4a", "#4a6ea3", "#a3864a", "#7c4aa3", "#4aa397",
];

pub fn assign_color(
    category: SourceCategory,
    raw_name: &str,
    server_color: Option<&str>,
    seen_index: usize,
) -> String {
    if let Some(color) = server_color.filter(|color| !color.trim().is_empty()) {
        return color.to_string();
    }

    let folded = raw_name.trim().to_lowercase();
    if let Some((_, color)) = KNOWN_METRICS.iter().find(|(name, _)| *name == folded) {
        return color.to_string();
    }

    if let Some(color) = category.palette().get(seen_index) {
        return color.to_string();
    }

    derive_color(&slugify(raw_name), category.salt())
}

pub fn derive_color(slug: &str, salt: &str) -> String {
    let mut hasher = FxHasher::default();
    hasher.write(slug.as_bytes());
    hasher.write(salt.as_bytes());
    let hash = hasher.finish();

    let hue = (hash % 360) as f32;
    let saturation = 0.45 + ((hash >> 9) % 40) as f32 / 100.0;
    let value = 0.60 + ((hash >> 17) % 30) as f32 / 100.0;

    let hsv: Hsv = Hsv::new(RgbHue::from_degrees(hue), saturation, value);
    let rgb: Srgb = Srgb::from_color(hsv);
    let (r, g, b) = rgb.into_format::<u8>().into_components();
    format!("#{r:02x}{g:02x}{b:02x}")
}
