//! Confetti colors
//!
//! Every piece carries a front/back pair so it can show a different face as
//! it turns. Colors round-trip through settings JSON as `#rrggbb` strings.

use serde::{Deserialize, Serialize};

/// RGBA color with components in 0..=1 (sRGB encoded)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("not a #rrggbb color: {:?}", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Front and back face colors of one piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    pub front: Color,
    pub back: Color,
}

impl ColorPair {
    pub const fn new(front: Color, back: Color) -> Self {
        Self { front, back }
    }
}

/// Magenta, green, teal and gold, each with a darker back face
pub fn default_palette() -> Vec<ColorPair> {
    [
        ("#df0049", "#660671"),
        ("#00e857", "#005291"),
        ("#2bebbc", "#05798a"),
        ("#ffd200", "#b06c00"),
    ]
    .iter()
    .filter_map(|(front, back)| Some(ColorPair::new(Color::from_hex(front)?, Color::from_hex(back)?)))
    .collect()
}
