use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A color parsed once from a CSS color string.
///
/// Keeps the original spelling so configs serialize back the way they were
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    source: String,
    rgba: [u8; 4],
}

impl Color {
    /// Opaque color from a `0xRRGGBB` literal
    pub fn from_hex_rgb(rgb: u32) -> Self {
        let [_, r, g, b] = rgb.to_be_bytes();
        Self {
            source: format!("#{r:02x}{g:02x}{b:02x}"),
            rgba: [r, g, b, 255],
        }
    }

    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }

    pub fn alpha(&self) -> f32 {
        self.rgba[3] as f32 / 255.0
    }

    pub fn to_skia(&self) -> tiny_skia::Color {
        let [r, g, b, a] = self.rgba;
        tiny_skia::Color::from_rgba8(r, g, b, a)
    }

    /// `rgb(r,g,b)` form for SVG `fill`; alpha goes to `fill-opacity`.
    pub fn to_svg_rgb(&self) -> String {
        let [r, g, b, _] = self.rgba;
        format!("rgb({r},{g},{b})")
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = csscolorparser::parse(trimmed).map_err(|e| ConfigError::InvalidColor {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: trimmed.to_string(),
            rgba: parsed.to_rgba8(),
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.source
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
