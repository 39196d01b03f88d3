use crate::error::RenderError;
use tiny_skia::Pixmap;

/// The raster target a post is drawn into.
///
/// Pixels are premultiplied RGBA, row-major, `width * height` of them.
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(RenderError::PixmapAllocation { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Reallocate to `width x height` unless already that size.
    /// Returns whether the buffer was replaced.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool, RenderError> {
        if self.width() == width && self.height() == height {
            return Ok(false);
        }
        tracing::debug!(
            from_width = self.width(),
            from_height = self.height(),
            width,
            height,
            "Resizing surface"
        );
        *self = Self::new(width, height)?;
        Ok(true)
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Straight-alpha RGBA of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    /// Straight-alpha RGBA bytes for the whole surface
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }
}
