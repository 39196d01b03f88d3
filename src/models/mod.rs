pub mod color;
pub mod config;
pub mod font;
pub mod post_config;

pub use color::Color;
pub use config::{AppConfig, ExportConfig, FontsConfig};
pub use font::{CatalogResponse, GoogleFont};
pub use post_config::{
    BackgroundFill, BackgroundType, FontFamily, FooterPosition, GradientDirection, Margin,
    PostConfig, PostSize, Zoom,
};
