use super::background::paint_background;
use super::layout::{self, HorizontalAlign, TextBlock, VerticalBaseline};
use super::surface::Surface;
use super::text::{TextLayer, TextRun};
use crate::error::RenderError;
use crate::fonts::FontBook;
use crate::models::PostConfig;

/// Draws a `PostConfig` onto a `Surface`.
///
/// Rendering is synchronous and a pure function of the config and the faces
/// currently in the font book: drawing the same config twice yields the same
/// pixels.
#[derive(Clone)]
pub struct PostRenderer {
    book: FontBook,
}

impl PostRenderer {
    pub fn new(book: FontBook) -> Self {
        Self { book }
    }

    pub fn book(&self) -> &FontBook {
        &self.book
    }

    /// Allocate a surface sized for `config` and render into it.
    pub fn render_new(&self, config: &PostConfig) -> Result<Surface, RenderError> {
        let mut surface = Surface::new(config.size.width, config.size.height)?;
        self.render(&mut surface, config)?;
        Ok(surface)
    }

    pub fn render(&self, surface: &mut Surface, config: &PostConfig) -> Result<(), RenderError> {
        let (width, height) = (config.size.width, config.size.height);
        surface.resize(width, height)?;

        paint_background(surface.pixmap_mut(), config.background());

        let mut layer = TextLayer::new(width, height, &config.font);

        let lines = if config.main_text.trim().is_empty() {
            Vec::new()
        } else {
            layout::split_lines(&config.main_text)
        };
        let block = TextBlock::new(lines.len(), config.font_size as f32, height);
        for (index, &line) in lines.iter().enumerate() {
            layer.push(TextRun {
                text: line,
                x: width as f32 / 2.0,
                y: block.line_center(index),
                align: HorizontalAlign::Center,
                baseline: VerticalBaseline::Middle,
                size: config.font_size,
                color: &config.text_color,
            });
        }

        if !config.footer_text.trim().is_empty() {
            let anchor = layout::footer_anchor(
                config.footer_position,
                width,
                height,
                config.footer_padding,
            );
            layer.push(TextRun {
                text: &config.footer_text,
                x: anchor.x,
                y: anchor.y,
                align: anchor.align,
                baseline: layout::footer_baseline(config.footer_position),
                size: config.footer_size,
                color: &config.footer_color,
            });
        }

        tracing::trace!(
            width,
            height,
            lines = lines.len(),
            font = %config.font,
            "Rendering post"
        );
        layer.draw(surface.pixmap_mut(), self.book.snapshot())
    }
}
