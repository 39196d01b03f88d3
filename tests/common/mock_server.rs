//! Mock font service: catalog, stylesheet and font file endpoints.

use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use super::fixtures;

pub const CATALOG_PATH: &str = "/webfonts/v1/webfonts";
pub const STYLESHEET_PATH: &str = "/css2";

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockFontServer {
    pub server: MockServer,
}

impl MockFontServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    pub fn catalog_url(&self) -> String {
        self.url_for(CATALOG_PATH)
    }

    pub fn stylesheet_url(&self) -> String {
        self.url_for(STYLESHEET_PATH)
    }

    /// Catalog listing `families`, expected to be hit exactly `times` times
    pub async fn mock_catalog(&self, families: &[&str], times: u64) {
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .and(query_param("sort", "popularity"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(fixtures::catalog_json(families))
                    .insert_header("content-type", "application/json"),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Catalog endpoint that answers with an error status
    pub async fn mock_catalog_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
            .mount(&self.server)
            .await;
    }

    /// Stylesheet for `family` pointing at one font file on this server.
    /// `query` is the decoded `family` parameter, e.g. `Roboto:wght@400;700`.
    pub async fn mock_stylesheet(&self, query: &str, font_file: &str, times: u64) {
        self.mock_stylesheet_delayed(query, font_file, times, Duration::ZERO)
            .await;
    }

    pub async fn mock_stylesheet_delayed(
        &self,
        query: &str,
        font_file: &str,
        times: u64,
        delay: Duration,
    ) {
        let family = query.split(':').next().unwrap_or(query);
        let css = fixtures::stylesheet_css(family, &[self.url_for(font_file)]);
        Mock::given(method("GET"))
            .and(path(STYLESHEET_PATH))
            .and(query_param("family", query))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(css)
                    .insert_header("content-type", "text/css")
                    .set_delay(delay),
            )
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Stylesheet endpoint that answers with an error status, at most `times` times
    pub async fn mock_stylesheet_error(&self, query: &str, status: u16, times: u64) {
        Mock::given(method("GET"))
            .and(path(STYLESHEET_PATH))
            .and(query_param("family", query))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(times)
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Serve the fixture font at `file_path`
    pub async fn mock_font_file(&self, file_path: &str) {
        Mock::given(method("GET"))
            .and(path(file_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(fixtures::font_bytes())
                    .insert_header("content-type", "font/ttf"),
            )
            .mount(&self.server)
            .await;
    }

    /// Number of requests received for `endpoint`
    pub async fn request_count(&self, endpoint: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == endpoint)
            .count()
    }
}
