// File: crates/animchart-core/src/text.rs
// Summary: Font description and the text-measurement seam used by layout.

use serde::{Deserialize, Deserializer};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub weight: String,
    /// Pixels; configs may give it as a number or a numeric string.
    #[serde(deserialize_with = "size_from_number_or_text")]
    pub size: f32,
    pub family: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(f32),
    Text(String),
}

fn size_from_number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    match RawSize::deserialize(deserializer)? {
        RawSize::Number(n) => Ok(n),
        RawSize::Text(s) => s.trim().trim_end_matches("px").parse().map_err(serde::de::Error::custom),
    }
}

impl FontSpec {
    pub fn new(weight: &str, size: f32, family: &str) -> Self {
        Self { weight: weight.to_string(), size, family: family.to_string() }
    }

    /// Bold 10px sans-serif used for legend chips.
    pub fn legend() -> Self { Self::new("bold", 10.0, "sans-serif") }

    /// Plain 10px sans-serif used inside the tooltip overlay.
    pub fn tooltip() -> Self { Self::new("normal", 10.0, "sans-serif") }

    pub fn is_bold(&self) -> bool {
        match self.weight.trim() {
            "bold" | "bolder" => true,
            w => w.parse::<u32>().map(|n| n >= 600).unwrap_or(false),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self { Self::new("bold", 12.0, "sans-serif") }
}

/// Width of a string rendered in a given font.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Deterministic measurer: every char advances `ratio * font.size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    pub ratio: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self { Self { ratio: 0.6 } }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * self.ratio
    }
}
