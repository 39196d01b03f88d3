//! Test fixtures and constants.

use postly::fonts::FontBook;
use postly::models::{FontsConfig, PostConfig, PostSize};

/// Family name of the bundled fixture font
pub const FIXTURE_FAMILY: &str = "DejaVu Sans";

pub fn font_bytes() -> Vec<u8> {
    std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/fonts/DejaVuSans.ttf"
    ))
    .expect("fixture font is present")
}

/// A font book holding only the fixture font
pub fn fixture_book() -> FontBook {
    let book = FontBook::empty();
    book.register(font_bytes());
    book
}

/// Catalog body in the remote format, with extra fields the client ignores
pub fn catalog_json(families: &[&str]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = families
        .iter()
        .map(|family| {
            serde_json::json!({
                "kind": "webfonts#webfont",
                "family": family,
                "variants": ["regular", "700", "700italic"],
                "subsets": ["latin", "latin-ext"],
                "category": "serif",
                "version": "v1",
            })
        })
        .collect();
    serde_json::json!({ "kind": "webfonts#webfontList", "items": items })
}

pub fn stylesheet_css(family: &str, urls: &[String]) -> String {
    urls.iter()
        .map(|url| {
            format!(
                "/* latin */\n@font-face {{\n  font-family: '{family}';\n  font-style: normal;\n  font-weight: 400;\n  font-display: swap;\n  src: url({url}) format('truetype');\n}}\n"
            )
        })
        .collect()
}

/// Font settings pointing at a mock server
pub fn fonts_config(base_url: &str) -> FontsConfig {
    FontsConfig {
        catalog_url: format!("{base_url}/webfonts/v1/webfonts"),
        stylesheet_url: format!("{base_url}/css2"),
        request_timeout_secs: 5,
        ..Default::default()
    }
}

/// Config with no text, at the given size
pub fn blank_config(width: u32, height: u32) -> PostConfig {
    PostConfig {
        size: PostSize::new("Test", width, height).expect("positive size"),
        main_text: String::new(),
        footer_text: String::new(),
        ..Default::default()
    }
}
