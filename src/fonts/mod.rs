pub mod book;
pub mod directory;
pub mod loader;
pub mod stylesheet;

pub use book::FontBook;
pub use directory::FontCatalog;
pub use loader::{FontEvent, FontLoader, LoadState};

use crate::error::FontError;
use crate::models::FontsConfig;

/// Shared HTTP client for catalog and font requests.
///
/// No browser user agent is sent, so the stylesheet endpoint answers with
/// TrueType sources that fontdb can parse.
pub fn http_client(config: &FontsConfig) -> Result<reqwest::Client, FontError> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .user_agent(concat!("postly/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Send a request and turn non-2xx answers into `FontError::Status`.
pub(crate) async fn send_checked(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<reqwest::Response, FontError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FontError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}
