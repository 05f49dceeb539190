// File: crates/animchart-core/src/color.rs
// Summary: RGBA color value, CSS-style parsing, HSV hue generation and luminance shifts.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }

    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const PIE_GRADIENT_START: Rgba = Rgba::rgb(0xdd, 0xdd, 0xdd);

    /// Same color with alpha scaled by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Shift every channel by `c * lum`, clamped to `[0, 255]`.
    /// `lum = 1.3` gives the light end of the bar gradients.
    pub fn luminance(self, lum: f32) -> Self {
        let shift = |c: u8| -> u8 {
            let c = c as f32;
            (c + c * lum).clamp(0.0, 255.0).round() as u8
        };
        Self { r: shift(self.r), g: shift(self.g), b: shift(self.b), a: self.a }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgba {
    fn default() -> Self { Self::BLACK }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a as f32 / 255.0)
        }
    }
}

impl FromStr for Rgba {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        if let Some(hex) = raw.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ConfigError::new("color", format!("bad hex color '{s}'")));
        }
        if let Some(body) = raw.strip_prefix("rgba(").or_else(|| raw.strip_prefix("rgb(")) {
            return parse_functional(body).ok_or_else(|| ConfigError::new("color", format!("bad rgb color '{s}'")));
        }
        named(&raw).ok_or_else(|| ConfigError::new("color", format!("unknown color '{s}'")))
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;
    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digit = |c: char| c.to_digit(16).map(|d| d as u8);
    let chars: Vec<char> = hex.chars().collect();
    match chars.len() {
        3 => {
            let (r, g, b) = (digit(chars[0])?, digit(chars[1])?, digit(chars[2])?);
            Some(Rgba::rgb(r * 17, g * 17, b * 17))
        }
        6 => {
            let byte = |i: usize| Some(digit(chars[i])? * 16 + digit(chars[i + 1])?);
            Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Rgba> {
    let inner = body.strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |p: &str| p.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let a = match parts.get(3) {
        Some(p) => (p.parse::<f32>().ok()?.clamp(0.0, 1.0) * 255.0).round() as u8,
        None => 255,
    };
    Some(Rgba::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
}

fn named(name: &str) -> Option<Rgba> {
    let c = match name {
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::rgb(255, 0, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "lime" => Rgba::rgb(0, 255, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "navy" => Rgba::rgb(0, 0, 128),
        "yellow" => Rgba::rgb(255, 255, 0),
        "orange" => Rgba::rgb(255, 165, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "silver" => Rgba::rgb(192, 192, 192),
        "maroon" => Rgba::rgb(128, 0, 0),
        "olive" => Rgba::rgb(128, 128, 0),
        "teal" => Rgba::rgb(0, 128, 128),
        "aqua" | "cyan" => Rgba::rgb(0, 255, 255),
        "fuchsia" | "magenta" => Rgba::rgb(255, 0, 255),
        "transparent" => Rgba::rgba(0, 0, 0, 0),
        _ => return None,
    };
    Some(c)
}

/// HSV to RGB; `h` in degrees `[0, 360]`, `s` and `v` in percent `[0, 100]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgba {
    let h = h.clamp(0.0, 360.0);
    let s = s.clamp(0.0, 100.0) / 100.0;
    let v = v.clamp(0.0, 100.0) / 100.0;
    let to_u8 = |x: f32| (x * 255.0).round() as u8;

    if s == 0.0 {
        return Rgba::rgb(to_u8(v), to_u8(v), to_u8(v));
    }

    let sector = h / 60.0;
    let i = sector.floor();
    let f = sector - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match i as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgba::rgb(to_u8(r), to_u8(g), to_u8(b))
}

/// `count` fully saturated colors with evenly spaced hues starting at red.
pub fn distinct_colors(count: usize) -> Vec<Rgba> {
    (0..count)
        .map(|i| hsv_to_rgb(i as f32 * 360.0 / count as f32, 100.0, 100.0))
        .collect()
}
