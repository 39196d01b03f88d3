//! On-demand font activation against a mock font service.

mod common;

use common::fixtures;
use common::mock_server::STYLESHEET_PATH;
use common::MockFontServer;
use postly::fonts::{FontBook, FontLoader, LoadState};
use pretty_assertions::assert_eq;
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, ResponseTemplate,
};

fn loader_for(server: &MockFontServer) -> FontLoader {
    FontLoader::new(
        reqwest::Client::new(),
        &fixtures::fonts_config(&server.url()),
        FontBook::empty(),
    )
}

#[tokio::test]
async fn test_activation_registers_faces() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Roboto:wght@400;700", "/fonts/roboto.ttf", 1)
        .await;
    server.mock_font_file("/fonts/roboto.ttf").await;
    let loader = loader_for(&server);

    assert_eq!(loader.state("Roboto"), LoadState::NotRequested);
    assert_eq!(loader.ensure_loaded("Roboto").await, LoadState::Loaded);

    assert!(loader.is_loaded("Roboto"));
    assert_eq!(loader.loaded_families(), vec!["Roboto"]);
    assert!(loader.book().has_family(fixtures::FIXTURE_FAMILY));
}

#[tokio::test]
async fn test_loaded_family_is_not_fetched_again() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Roboto:wght@400;700", "/fonts/roboto.ttf", 1)
        .await;
    server.mock_font_file("/fonts/roboto.ttf").await;
    let loader = loader_for(&server);

    assert_eq!(loader.ensure_loaded("Roboto").await, LoadState::Loaded);
    assert_eq!(loader.ensure_loaded("Roboto").await, LoadState::Loaded);
    assert_eq!(loader.request("Roboto"), LoadState::Loaded);

    assert_eq!(server.request_count(STYLESHEET_PATH).await, 1);
    assert_eq!(loader.book().face_count(), 1);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_activation() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet_delayed(
            "Lato:wght@400;700",
            "/fonts/lato.ttf",
            1,
            Duration::from_millis(200),
        )
        .await;
    server.mock_font_file("/fonts/lato.ttf").await;
    let loader = loader_for(&server);

    let (a, b, c) = tokio::join!(
        loader.ensure_loaded("Lato"),
        loader.ensure_loaded("Lato"),
        loader.ensure_loaded("Lato"),
    );

    assert_eq!([a, b, c], [LoadState::Loaded; 3]);
    assert_eq!(server.request_count(STYLESHEET_PATH).await, 1);
}

#[tokio::test]
async fn test_failed_activation_can_be_retried() {
    let server = MockFontServer::start().await;
    // First request fails, later ones succeed
    server
        .mock_stylesheet_error("Lobster:wght@400;700", 500, 1)
        .await;
    server
        .mock_stylesheet("Lobster:wght@400;700", "/fonts/lobster.ttf", 1)
        .await;
    server.mock_font_file("/fonts/lobster.ttf").await;
    let loader = loader_for(&server);

    assert_eq!(loader.ensure_loaded("Lobster").await, LoadState::Failed);
    assert_eq!(loader.state("Lobster"), LoadState::Failed);
    assert!(loader.loaded_families().is_empty());

    assert_eq!(loader.ensure_loaded("Lobster").await, LoadState::Loaded);
    assert_eq!(server.request_count(STYLESHEET_PATH).await, 2);
}

#[tokio::test]
async fn test_system_font_issues_no_request() {
    let server = MockFontServer::start().await;
    let loader = loader_for(&server);

    assert_eq!(loader.ensure_loaded("Arial").await, LoadState::Loaded);
    assert_eq!(loader.ensure_loaded("Times New Roman").await, LoadState::Loaded);
    assert!(loader.is_loaded("Segoe UI"));

    assert_eq!(server.request_count(STYLESHEET_PATH).await, 0);
}

#[tokio::test]
async fn test_request_publishes_event() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Poppins:wght@400;700", "/fonts/poppins.ttf", 1)
        .await;
    server.mock_font_file("/fonts/poppins.ttf").await;
    let loader = loader_for(&server);
    let mut events = loader.subscribe();

    assert_eq!(loader.request("Poppins"), LoadState::Loading);
    assert_eq!(loader.state("Poppins"), LoadState::Loading);

    let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("event within timeout")
        .expect("channel open");
    assert_eq!(event.family, "Poppins");
    assert_eq!(event.state, LoadState::Loaded);
    assert!(loader.is_loaded("Poppins"));
}

#[tokio::test]
async fn test_weights_follow_catalog_variants() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Raleway:wght@300;400;800", "/fonts/raleway.ttf", 1)
        .await;
    server.mock_font_file("/fonts/raleway.ttf").await;
    let loader = loader_for(&server);

    let variants: Vec<String> = ["800", "regular", "300", "300italic"]
        .iter()
        .map(|v| v.to_string())
        .collect();

    assert_eq!(
        loader.ensure_loaded_with("Raleway", &variants).await,
        LoadState::Loaded
    );
}

#[tokio::test]
async fn test_family_with_space_is_encoded() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Open Sans:wght@400;700", "/fonts/open-sans.ttf", 1)
        .await;
    server.mock_font_file("/fonts/open-sans.ttf").await;
    let loader = loader_for(&server);

    assert_eq!(loader.ensure_loaded("Open Sans").await, LoadState::Loaded);

    let requests = server.server.received_requests().await.unwrap();
    let stylesheet = requests
        .iter()
        .find(|r| r.url.path() == STYLESHEET_PATH)
        .unwrap();
    assert!(stylesheet
        .url
        .as_str()
        .contains("family=Open%20Sans:wght@400;700&display=swap"));
}

#[tokio::test]
async fn test_stylesheet_without_sources_fails() {
    let server = MockFontServer::start().await;
    Mock::given(method("GET"))
        .and(path(STYLESHEET_PATH))
        .and(query_param("family", "Oswald:wght@400;700"))
        .respond_with(ResponseTemplate::new(200).set_body_string("/* nothing */"))
        .mount(&server.server)
        .await;
    let loader = loader_for(&server);

    assert_eq!(loader.ensure_loaded("Oswald").await, LoadState::Failed);
}

#[tokio::test]
async fn test_missing_font_file_fails() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Nunito:wght@400;700", "/fonts/missing.ttf", 1)
        .await;
    let loader = loader_for(&server);

    assert_eq!(loader.ensure_loaded("Nunito").await, LoadState::Failed);
    assert_eq!(loader.book().face_count(), 0);
}

#[tokio::test]
async fn test_unusable_font_data_fails() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Ubuntu:wght@400;700", "/fonts/garbage.ttf", 1)
        .await;
    Mock::given(method("GET"))
        .and(path("/fonts/garbage.ttf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a font".to_vec()))
        .mount(&server.server)
        .await;
    let loader = loader_for(&server);

    assert_eq!(loader.ensure_loaded("Ubuntu").await, LoadState::Failed);
}

#[tokio::test]
async fn test_different_families_load_independently() {
    let server = MockFontServer::start().await;
    server
        .mock_stylesheet("Lora:wght@400;700", "/fonts/lora.ttf", 1)
        .await;
    server
        .mock_stylesheet_error("Pacifico:wght@400;700", 404, 1)
        .await;
    server.mock_font_file("/fonts/lora.ttf").await;
    let loader = loader_for(&server);

    let (lora, pacifico) = tokio::join!(loader.ensure_loaded("Lora"), loader.ensure_loaded("Pacifico"));

    assert_eq!(lora, LoadState::Loaded);
    assert_eq!(pacifico, LoadState::Failed);
    assert_eq!(loader.loaded_families(), vec!["Lora"]);
}
