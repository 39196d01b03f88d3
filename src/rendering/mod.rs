pub mod background;
pub mod export;
pub mod layout;
pub mod renderer;
pub mod surface;
pub mod text;

pub use export::{default_filename, encode, ExportedFile, Exporter, ImageFormat};
pub use renderer::PostRenderer;
pub use surface::Surface;
