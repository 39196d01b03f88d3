//! Postly - social media post images from a declarative config.
//!
//! A `PostConfig` is rendered onto a raster `Surface` and exported as PNG or
//! JPEG. Downloadable fonts are activated on demand by the `FontLoader`.

pub mod error;
pub mod fonts;
pub mod models;
pub mod rendering;
pub mod session;

pub use session::PostSession;
