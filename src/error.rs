use thiserror::Error;

/// Errors raised while validating configuration input at the boundary.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown {field} value: {value}")]
    UnknownValue { field: &'static str, value: String },

    #[error("Invalid color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Invalid size {width}x{height}: dimensions must be positive")]
    InvalidSize { width: u32, height: u32 },

    #[error("Unknown size preset: {0}")]
    UnknownPreset(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from fetching or activating fonts.
///
/// These never escape the font subsystem: the catalog falls back to a fixed
/// list and a failed activation only marks the family as failed.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("Catalog returned no fonts")]
    EmptyCatalog,

    #[error("Invalid font source URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Stylesheet for {0} declares no font sources")]
    EmptyStylesheet(String),

    #[error("No usable font faces for {0}")]
    NoFaces(String),

    #[error("Font activation task ended without a result")]
    TaskAborted,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Text layer parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap for {width}x{height}")]
    PixmapAllocation { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Canvas not ready")]
    SurfaceNotReady,

    #[error("Encoder produced no image data")]
    EmptyOutput,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("JPEG encode error: {0}")]
    JpegEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
