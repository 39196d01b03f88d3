//! Encoding a rendered surface to PNG or JPEG and writing it out.

use super::surface::Surface;
use crate::error::{ConfigError, ExportError};
use crate::models::ExportConfig;
use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    Jpg,
    #[default]
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            _ => Err(ConfigError::UnknownValue {
                field: "format",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `social-post-<unix millis>.<ext>`
pub fn default_filename(format: ImageFormat, timestamp: DateTime<Utc>) -> String {
    format!(
        "social-post-{}.{}",
        timestamp.timestamp_millis(),
        format.extension()
    )
}

/// Encode the surface. PNG is lossless 8-bit RGBA; JPEG is composited over
/// white at quality 95.
pub fn encode(surface: &Surface, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ImageFormat::Png => encode_png(surface),
        ImageFormat::Jpg => encode_jpeg(surface),
    }
}

fn encode_png(surface: &Surface) -> Result<Vec<u8>, ExportError> {
    let rgba = surface.to_rgba();
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ExportError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&rgba)
            .map_err(|e| ExportError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

fn encode_jpeg(surface: &Surface) -> Result<Vec<u8>, ExportError> {
    let rgb = rgba_over_white(&surface.to_rgba());
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode(
            &rgb,
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ExportError::JpegEncode(e.to_string()))?;
    Ok(buf)
}

/// Drop alpha by compositing against white.
fn rgba_over_white(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|pixel| {
            let a = pixel[3] as u16;
            let blend = |c: u8| ((c as u16 * a + 255 * (255 - a)) / 255) as u8;
            [blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]
        })
        .collect()
}

/// Lossless re-compression; keeps the input when oxipng fails.
fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let options = oxipng::Options {
        strip: oxipng::StripChunks::Safe,
        optimize_alpha: false,
        ..Default::default()
    };
    match oxipng::optimize_from_memory(&png_bytes, &options) {
        Ok(optimized) => optimized,
        Err(e) => {
            tracing::warn!(error = %e, "PNG optimization failed, keeping unoptimized output");
            png_bytes
        }
    }
}

/// A file written by `Exporter::export`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub format: ImageFormat,
    pub bytes: usize,
}

pub struct Exporter {
    output_dir: PathBuf,
    optimize_png: bool,
}

impl Exporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            optimize_png: config.optimize_png,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Encode with this exporter's settings
    pub fn encode(&self, surface: &Surface, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
        let bytes = encode(surface, format)?;
        if format == ImageFormat::Png && self.optimize_png {
            return Ok(optimize_png(bytes));
        }
        Ok(bytes)
    }

    /// Write the surface to `<output_dir>/<filename>`, or a timestamped
    /// default name when `filename` is `None`.
    ///
    /// Nothing is written when there is no surface or the encoder produced
    /// no data.
    pub fn export(
        &self,
        surface: Option<&Surface>,
        format: ImageFormat,
        filename: Option<&str>,
    ) -> Result<ExportedFile, ExportError> {
        let surface = surface.ok_or(ExportError::SurfaceNotReady)?;

        let bytes = self.encode(surface, format)?;
        if bytes.is_empty() {
            return Err(ExportError::EmptyOutput);
        }

        let filename = match filename {
            Some(name) => name.to_string(),
            None => default_filename(format, Utc::now()),
        };
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(filename);
        std::fs::write(&path, &bytes)?;

        tracing::info!(
            path = %path.display(),
            format = %format,
            bytes = bytes.len(),
            width = surface.width(),
            height = surface.height(),
            "Exported post"
        );

        Ok(ExportedFile {
            path,
            format,
            bytes: bytes.len(),
        })
    }
}
