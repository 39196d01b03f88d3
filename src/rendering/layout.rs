//! Pure geometry for post rendering.

use crate::models::{FooterPosition, GradientDirection, Margin};

/// Main text line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Extra distance from the top edge for top-row footers
pub const FOOTER_TOP_INSET: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    /// SVG `text-anchor` value
    pub fn text_anchor(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Center => "middle",
            Self::Right => "end",
        }
    }
}

/// Which part of the glyph box sits on the anchor's y coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalBaseline {
    Top,
    Middle,
    Bottom,
}

impl VerticalBaseline {
    /// SVG `dominant-baseline` value
    pub fn dominant_baseline(self) -> &'static str {
        match self {
            Self::Top => "text-before-edge",
            Self::Middle => "central",
            Self::Bottom => "text-after-edge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
    pub align: HorizontalAlign,
}

/// Start and end points of a linear gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientVector {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// Computed but not applied to text placement; see DESIGN.md.
pub fn margin_pixels(margin: Margin, width: u32, height: u32) -> f32 {
    width.min(height) as f32 * margin.factor()
}

pub fn footer_anchor(position: FooterPosition, width: u32, height: u32, padding: u32) -> Anchor {
    let (w, h, p) = (width as f32, height as f32, padding as f32);
    let top = p + FOOTER_TOP_INSET;
    let bottom = h - p;

    let (x, y, align) = match position {
        FooterPosition::BottomCenter => (w / 2.0, bottom, HorizontalAlign::Center),
        FooterPosition::BottomLeft => (p, bottom, HorizontalAlign::Left),
        FooterPosition::BottomRight => (w - p, bottom, HorizontalAlign::Right),
        FooterPosition::TopCenter => (w / 2.0, top, HorizontalAlign::Center),
        FooterPosition::TopLeft => (p, top, HorizontalAlign::Left),
        FooterPosition::TopRight => (w - p, top, HorizontalAlign::Right),
    };
    Anchor { x, y, align }
}

pub fn footer_baseline(position: FooterPosition) -> VerticalBaseline {
    if position.is_top() {
        VerticalBaseline::Top
    } else {
        VerticalBaseline::Bottom
    }
}

pub fn gradient_vector(direction: GradientDirection, width: u32, height: u32) -> GradientVector {
    let (w, h) = (width as f32, height as f32);
    let (x0, y0, x1, y1) = match direction {
        GradientDirection::ToR => (0.0, 0.0, w, 0.0),
        GradientDirection::ToL => (w, 0.0, 0.0, 0.0),
        GradientDirection::ToB => (0.0, 0.0, 0.0, h),
        GradientDirection::ToT => (0.0, h, 0.0, 0.0),
        GradientDirection::ToBr => (0.0, 0.0, w, h),
        GradientDirection::ToBl => (w, 0.0, 0.0, h),
        GradientDirection::ToTr => (0.0, h, w, 0.0),
        GradientDirection::ToTl => (w, h, 0.0, 0.0),
    };
    GradientVector { x0, y0, x1, y1 }
}

/// Lines of the main text, split on `\n` with any trailing `\r` removed.
/// Empty lines are kept so they take up a slot.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Vertical placement of the main text block, centered on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBlock {
    pub line_count: usize,
    pub line_height: f32,
    pub start_y: f32,
}

impl TextBlock {
    pub fn new(line_count: usize, font_size: f32, canvas_height: u32) -> Self {
        let line_height = font_size * LINE_HEIGHT_FACTOR;
        let total = line_count as f32 * line_height;
        Self {
            line_count,
            line_height,
            start_y: (canvas_height as f32 - total) / 2.0,
        }
    }

    pub fn total_height(&self) -> f32 {
        self.line_count as f32 * self.line_height
    }

    /// Vertical center of line `index`
    pub fn line_center(&self, index: usize) -> f32 {
        self.start_y + index as f32 * self.line_height + self.line_height / 2.0
    }
}
