//! The editing session: config changes, font events and redraws.

mod common;

use common::{count_differing, fixtures, MockFontServer};
use postly::fonts::{FontBook, FontLoader, LoadState};
use postly::models::{Color, ExportConfig, FontFamily, PostConfig};
use postly::rendering::{Exporter, ImageFormat};
use postly::PostSession;
use std::time::Duration;

const WHITE: [u8; 4] = [255, 255, 255, 255];

fn session_for(server: &MockFontServer, config: PostConfig, output_dir: &std::path::Path) -> PostSession {
    let loader = FontLoader::new(
        reqwest::Client::new(),
        &fixtures::fonts_config(&server.url()),
        FontBook::empty(),
    );
    let exporter = Exporter::new(&ExportConfig {
        output_dir: output_dir.to_path_buf(),
        optimize_png: false,
    });
    PostSession::new(config, loader, exporter)
}

fn roboto_config() -> PostConfig {
    PostConfig {
        main_text: "Hello".to_string(),
        font: FontFamily::new("Roboto"),
        font_size: 60,
        text_color: Color::from_hex_rgb(0x000000),
        ..fixtures::blank_config(400, 400)
    }
}

/// Pump until a redraw happens or the timeout expires
async fn pump_until_redraw(session: &mut PostSession) -> bool {
    for _ in 0..100 {
        if session.pump_font_events().unwrap() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn test_font_arrival_triggers_redraw() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Roboto:wght@400;700", "/fonts/roboto.ttf", 1)
        .await;
    server.mock_font_file("/fonts/roboto.ttf").await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_for(&server, PostConfig::default(), dir.path());

    session.apply(roboto_config()).unwrap();

    // No faces yet, so nothing but background
    let surface = session.surface().unwrap();
    assert_eq!(count_differing(surface, WHITE, (0, 0), (400, 400)), 0);
    assert_eq!(session.loader().state("Roboto"), LoadState::Loading);

    assert!(pump_until_redraw(&mut session).await);

    let surface = session.surface().unwrap();
    assert!(count_differing(surface, WHITE, (0, 150), (400, 250)) > 0);
    assert!(session.loader().is_loaded("Roboto"));
}

#[tokio::test]
async fn test_wait_for_font_redraws_current_font() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Roboto:wght@400;700", "/fonts/roboto.ttf", 1)
        .await;
    server.mock_font_file("/fonts/roboto.ttf").await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_for(&server, PostConfig::default(), dir.path());
    session.apply(roboto_config()).unwrap();

    let state = session
        .wait_for_font(&FontFamily::new("Roboto"))
        .await
        .unwrap();

    assert_eq!(state, LoadState::Loaded);
    let surface = session.surface().unwrap();
    assert!(count_differing(surface, WHITE, (0, 150), (400, 250)) > 0);
}

#[tokio::test]
async fn test_event_for_other_font_is_ignored() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Lato:wght@400;700", "/fonts/lato.ttf", 1)
        .await;
    server.mock_font_file("/fonts/lato.ttf").await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_for(&server, fixtures::blank_config(50, 50), dir.path());
    session.apply(fixtures::blank_config(50, 50)).unwrap();

    assert_eq!(
        session.loader().ensure_loaded("Lato").await,
        LoadState::Loaded
    );

    assert!(!session.pump_font_events().unwrap());
}

#[tokio::test]
async fn test_apply_then_export() {
    let server = MockFontServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_for(&server, PostConfig::default(), dir.path());

    assert!(session.export(ImageFormat::Png, Some("early.png")).is_err());

    session.apply(fixtures::blank_config(100, 60)).unwrap();
    let exported = session.export(ImageFormat::Png, Some("post.png")).unwrap();

    common::assert_png(&std::fs::read(exported.path).unwrap());
    assert!(!dir.path().join("early.png").exists());
}
