//! Declarative description of a post image.
//!
//! A `PostConfig` is an immutable value: every edit produces a new config that
//! replaces the previous one wholesale. Enumerated settings are closed enums,
//! so unknown values are rejected while parsing instead of silently mapped to
//! a default.

use crate::error::ConfigError;
use crate::fonts::directory;
use crate::models::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Input bounds used by editors. The renderer does not enforce them.
pub const FONT_SIZE_RANGE: (u32, u32) = (12, 200);
pub const FOOTER_SIZE_RANGE: (u32, u32) = (8, 100);

/// Width of the on-screen preview at 100% zoom.
pub const BASE_DISPLAY_WIDTH: u32 = 400;

/// Named size presets: (name, width, height)
pub const POST_SIZES: [(&str, u32, u32); 4] = [
    ("Instagram Square", 1080, 1080),
    ("Facebook Link", 1200, 628),
    ("LinkedIn Post", 1200, 627),
    ("Story / Portrait", 1080, 1920),
];

/// Gradient presets: (name, start, end)
pub const GRADIENT_PRESETS: [(&str, &str, &str); 6] = [
    ("Ocean", "#667eea", "#764ba2"),
    ("Sunset", "#f093fb", "#f5576c"),
    ("Forest", "#4facfe", "#00f2fe"),
    ("Purple", "#a8edea", "#fed6e3"),
    ("Fire", "#ff9a9e", "#fecfef"),
    ("Sky", "#a1c4fd", "#c2e9fb"),
];

/// Target pixel dimensions of the exported image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSize {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl PostSize {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidSize { width, height });
        }
        Ok(Self {
            name: name.into(),
            width,
            height,
        })
    }

    /// Look up a preset by name (case-insensitive)
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        POST_SIZES
            .iter()
            .find(|(preset, _, _)| preset.eq_ignore_ascii_case(name.trim()))
            .map(|&(preset, width, height)| Self {
                name: preset.to_string(),
                width,
                height,
            })
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
    }

    pub fn presets() -> Vec<Self> {
        POST_SIZES
            .iter()
            .map(|&(name, width, height)| Self {
                name: name.to_string(),
                width,
                height,
            })
            .collect()
    }
}

impl Default for PostSize {
    fn default() -> Self {
        let (name, width, height) = POST_SIZES[0];
        Self {
            name: name.to_string(),
            width,
            height,
        }
    }
}

/// Preview zoom percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Zoom {
    P50,
    P75,
    #[default]
    P100,
    P125,
    P150,
}

impl Zoom {
    pub const ALL: [Self; 5] = [Self::P50, Self::P75, Self::P100, Self::P125, Self::P150];

    pub fn percent(self) -> u32 {
        match self {
            Self::P50 => 50,
            Self::P75 => 75,
            Self::P100 => 100,
            Self::P125 => 125,
            Self::P150 => 150,
        }
    }
}

impl TryFrom<u32> for Zoom {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|zoom| zoom.percent() == value)
            .ok_or_else(|| ConfigError::UnknownValue {
                field: "zoom",
                value: value.to_string(),
            })
    }
}

impl From<Zoom> for u32 {
    fn from(zoom: Zoom) -> Self {
        zoom.percent()
    }
}

impl FromStr for Zoom {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .trim_end_matches('%')
            .parse::<u32>()
            .map_err(|_| ConfigError::UnknownValue {
                field: "zoom",
                value: s.to_string(),
            })?;
        Self::try_from(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Margin {
    Narrow,
    #[default]
    Medium,
    Wide,
}

impl Margin {
    pub const ALL: [Self; 3] = [Self::Narrow, Self::Medium, Self::Wide];

    /// Fraction of the shorter canvas side
    pub fn factor(self) -> f32 {
        match self {
            Self::Narrow => 0.05,
            Self::Medium => 0.08,
            Self::Wide => 0.12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Medium => "medium",
            Self::Wide => "wide",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundType {
    #[default]
    Solid,
    Gradient,
}

impl BackgroundType {
    pub const ALL: [Self; 2] = [Self::Solid, Self::Gradient];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Gradient => "gradient",
        }
    }
}

/// Linear gradient direction, named after the side or corner it runs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    #[default]
    ToR,
    ToL,
    ToB,
    ToT,
    ToBr,
    ToBl,
    ToTr,
    ToTl,
}

impl GradientDirection {
    pub const ALL: [Self; 8] = [
        Self::ToR,
        Self::ToL,
        Self::ToB,
        Self::ToT,
        Self::ToBr,
        Self::ToBl,
        Self::ToTr,
        Self::ToTl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToR => "to-r",
            Self::ToL => "to-l",
            Self::ToB => "to-b",
            Self::ToT => "to-t",
            Self::ToBr => "to-br",
            Self::ToBl => "to-bl",
            Self::ToTr => "to-tr",
            Self::ToTl => "to-tl",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ToR => "Left to Right",
            Self::ToL => "Right to Left",
            Self::ToB => "Top to Bottom",
            Self::ToT => "Bottom to Top",
            Self::ToBr => "Top-Left to Bottom-Right",
            Self::ToBl => "Top-Right to Bottom-Left",
            Self::ToTr => "Bottom-Left to Top-Right",
            Self::ToTl => "Bottom-Right to Top-Left",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FooterPosition {
    #[default]
    BottomCenter,
    BottomLeft,
    BottomRight,
    TopCenter,
    TopLeft,
    TopRight,
}

impl FooterPosition {
    pub const ALL: [Self; 6] = [
        Self::BottomCenter,
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopCenter,
        Self::TopLeft,
        Self::TopRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomCenter => "bottom-center",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::TopCenter => "top-center",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
        }
    }

    pub fn is_top(self) -> bool {
        matches!(self, Self::TopCenter | Self::TopLeft | Self::TopRight)
    }
}

/// Parse one of a closed set of names, rejecting anything else.
fn parse_named<T: Copy>(
    field: &'static str,
    value: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, ConfigError> {
    let wanted = value.trim();
    all.iter()
        .copied()
        .find(|candidate| name(*candidate).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ConfigError::UnknownValue {
            field,
            value: value.to_string(),
        })
}

impl FromStr for Margin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("margin", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for BackgroundType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("background type", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for GradientDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("gradient direction", s, &Self::ALL, Self::as_str)
    }
}

impl FromStr for FooterPosition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("footer position", s, &Self::ALL, Self::as_str)
    }
}

/// A font family name as used by the renderer.
///
/// CSS spellings (`"Open Sans"`, `Open+Sans`) are normalized to the bare
/// family name on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FontFamily(String);

impl FontFamily {
    pub fn new(name: &str) -> Self {
        Self(directory::display_name(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// CSS-safe reference, quoted when the name contains a space
    pub fn css_name(&self) -> String {
        directory::css_name(&self.0)
    }

    pub fn is_system(&self) -> bool {
        directory::is_system_font(&self.0)
    }
}

impl From<String> for FontFamily {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        family.0
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fill that governs the background, selected by `background_type`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundFill<'a> {
    Solid(&'a Color),
    Gradient {
        direction: GradientDirection,
        start: &'a Color,
        end: &'a Color,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    pub size: PostSize,
    pub zoom: Zoom,
    pub margin: Margin,
    pub background_type: BackgroundType,
    pub background_color: Color,
    pub gradient_direction: GradientDirection,
    pub gradient_start: Color,
    pub gradient_end: Color,
    pub main_text: String,
    pub font: FontFamily,
    pub font_size: u32,
    pub text_color: Color,
    pub footer_text: String,
    pub footer_color: Color,
    pub footer_size: u32,
    pub footer_position: FooterPosition,
    pub footer_padding: u32,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            size: PostSize::default(),
            zoom: Zoom::default(),
            margin: Margin::default(),
            background_type: BackgroundType::Solid,
            background_color: Color::from_hex_rgb(0xffffff),
            gradient_direction: GradientDirection::ToR,
            gradient_start: Color::from_hex_rgb(0x667eea),
            gradient_end: Color::from_hex_rgb(0x764ba2),
            main_text: "Type your text. Use Enter for a new line.".to_string(),
            font: FontFamily::new("Arial"),
            font_size: 36,
            text_color: Color::from_hex_rgb(0x000000),
            footer_text: "ibenps.com | PPC".to_string(),
            footer_color: Color::from_hex_rgb(0x6b7280),
            footer_size: 16,
            footer_position: FooterPosition::BottomCenter,
            footer_padding: 20,
        }
    }
}

impl PostConfig {
    /// Parse and validate a config from YAML. Missing fields take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            size = %config.size.name,
            font = %config.font,
            "Loaded post config"
        );
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject configs the renderer cannot draw; warn about values outside
    /// the editor bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(ConfigError::InvalidSize {
                width: self.size.width,
                height: self.size.height,
            });
        }
        if !(FONT_SIZE_RANGE.0..=FONT_SIZE_RANGE.1).contains(&self.font_size) {
            tracing::warn!(font_size = self.font_size, "Font size outside editor range");
        }
        if !(FOOTER_SIZE_RANGE.0..=FOOTER_SIZE_RANGE.1).contains(&self.footer_size) {
            tracing::warn!(
                footer_size = self.footer_size,
                "Footer size outside editor range"
            );
        }
        Ok(())
    }

    pub fn background(&self) -> BackgroundFill<'_> {
        match self.background_type {
            BackgroundType::Solid => BackgroundFill::Solid(&self.background_color),
            BackgroundType::Gradient => BackgroundFill::Gradient {
                direction: self.gradient_direction,
                start: &self.gradient_start,
                end: &self.gradient_end,
            },
        }
    }

    /// On-screen preview size; never affects the pixel buffer
    pub fn display_size(&self) -> (u32, u32) {
        let width = BASE_DISPLAY_WIDTH * self.zoom.percent() / 100;
        let height = (width as f64 * self.size.height as f64 / self.size.width as f64).round();
        (width, height as u32)
    }

    pub fn with_size(self, size: PostSize) -> Self {
        Self { size, ..self }
    }

    pub fn with_font(self, font: FontFamily) -> Self {
        Self { font, ..self }
    }

    /// Switch to a gradient background using a named preset
    pub fn with_gradient_preset(self, name: &str) -> Result<Self, ConfigError> {
        let &(_, start, end) = GRADIENT_PRESETS
            .iter()
            .find(|(preset, _, _)| preset.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        Ok(Self {
            background_type: BackgroundType::Gradient,
            gradient_start: start.parse()?,
            gradient_end: end.parse()?,
            ..self
        })
    }
}
