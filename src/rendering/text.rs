//! Text drawing via an SVG overlay rasterized with resvg.

use super::layout::{HorizontalAlign, VerticalBaseline};
use crate::error::RenderError;
use crate::models::{Color, FontFamily};
use resvg::usvg::{self, Transform};
use std::fmt::Write as _;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// One line of text at an absolute position
#[derive(Debug, Clone)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub align: HorizontalAlign,
    pub baseline: VerticalBaseline,
    pub size: u32,
    pub color: &'a Color,
}

/// All text drawn on top of a background, sharing one font family
pub struct TextLayer<'a> {
    width: u32,
    height: u32,
    family: &'a FontFamily,
    runs: Vec<TextRun<'a>>,
}

impl<'a> TextLayer<'a> {
    pub fn new(width: u32, height: u32, family: &'a FontFamily) -> Self {
        Self {
            width,
            height,
            family,
            runs: Vec::new(),
        }
    }

    pub fn push(&mut self, run: TextRun<'a>) {
        self.runs.push(run);
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    pub fn to_svg(&self) -> String {
        let (width, height) = (self.width, self.height);
        let family = xml_escape(&format!("{}, sans-serif", self.family.css_name()));

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" xml:space="preserve">"#
        );
        svg.push('\n');

        for run in self.runs.iter().filter(|run| !run.text.is_empty()) {
            let _ = writeln!(
                svg,
                r#"  <text x="{}" y="{}" font-family="{family}" font-size="{}" fill="{}" fill-opacity="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
                run.x,
                run.y,
                run.size,
                run.color.to_svg_rgb(),
                run.color.alpha(),
                run.align.text_anchor(),
                run.baseline.dominant_baseline(),
                xml_escape(run.text)
            );
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Rasterize the layer on top of `pixmap` using faces from `fontdb`.
    pub fn draw(&self, pixmap: &mut Pixmap, fontdb: Arc<fontdb::Database>) -> Result<(), RenderError> {
        if self.is_empty() {
            return Ok(());
        }

        let svg = self.to_svg();
        let options = usvg::Options {
            fontdb,
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
        Ok(())
    }
}

/// Escape markup and drop characters XML 1.0 cannot carry, even as
/// character references.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}
