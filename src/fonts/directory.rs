//! Built-in font names and the remote font catalog.
//!
//! The catalog is fetched at most once per `FontCatalog` and kept for the
//! lifetime of that object. A failed fetch never surfaces: callers get the
//! fixed fallback list instead, and the next call tries the network again.

use crate::error::FontError;
use crate::models::{CatalogResponse, FontsConfig, GoogleFont};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Fonts provided by the platform; these never need activation.
pub const SYSTEM_FONTS: [&str; 13] = [
    "Arial",
    "Helvetica",
    "Georgia",
    "Times New Roman",
    "Garamond",
    "Trebuchet MS",
    "Verdana",
    "Courier New",
    "Lucida Sans",
    "Palatino",
    "Tahoma",
    "Impact",
    "Segoe UI",
];

/// Popular downloadable families offered when the catalog is unreachable.
pub const FALLBACK_FONTS: [&str; 25] = [
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Source Sans Pro",
    "Roboto Condensed",
    "Oswald",
    "Raleway",
    "Poppins",
    "Merriweather",
    "PT Sans",
    "Playfair Display",
    "Lora",
    "Nunito",
    "Ubuntu",
    "Roboto Slab",
    "Slabo 27px",
    "Fjalla One",
    "Work Sans",
    "Crimson Text",
    "Dancing Script",
    "Pacifico",
    "Lobster",
    "Great Vibes",
    "Indie Flower",
];

pub fn is_system_font(family: &str) -> bool {
    let family = display_name(family);
    SYSTEM_FONTS
        .iter()
        .any(|system| system.eq_ignore_ascii_case(&family))
}

/// CSS-safe family reference: quoted when it contains a space.
pub fn css_name(family: &str) -> String {
    if family.contains(' ') {
        format!("\"{family}\"")
    } else {
        family.to_string()
    }
}

/// Bare family name from a CSS reference (`"Open Sans"`, `Open+Sans`).
pub fn display_name(css: &str) -> String {
    css.replace(['"', '\''], "").replace('+', " ").trim().to_string()
}

pub fn fallback_catalog() -> Vec<GoogleFont> {
    FALLBACK_FONTS
        .iter()
        .map(|family| GoogleFont::fallback(family))
        .collect()
}

/// Owned cache of the remote font catalog
pub struct FontCatalog {
    client: reqwest::Client,
    catalog_url: String,
    api_key: Option<String>,
    cache: OnceCell<Arc<Vec<GoogleFont>>>,
}

impl FontCatalog {
    pub fn new(client: reqwest::Client, config: &FontsConfig) -> Self {
        Self {
            client,
            catalog_url: config.catalog_url.clone(),
            api_key: config.api_key.clone(),
            cache: OnceCell::new(),
        }
    }

    /// Catalog entries in popularity order, or the fallback list.
    ///
    /// Concurrent first calls share a single request.
    pub async fn fetch(&self) -> Arc<Vec<GoogleFont>> {
        match self.cache.get_or_try_init(|| self.fetch_remote()).await {
            Ok(fonts) => fonts.clone(),
            Err(e) => {
                tracing::warn!(error = %e, url = %self.catalog_url, "Font catalog unavailable, using fallback list");
                Arc::new(fallback_catalog())
            }
        }
    }

    async fn fetch_remote(&self) -> Result<Arc<Vec<GoogleFont>>, FontError> {
        let mut query = vec![("sort", "popularity")];
        if let Some(key) = self.api_key.as_deref() {
            query.push(("key", key));
        }

        let request = self.client.get(&self.catalog_url).query(&query);
        let body = super::send_checked(request, &self.catalog_url)
            .await?
            .bytes()
            .await?;
        let response: CatalogResponse = serde_json::from_slice(&body)?;
        if response.items.is_empty() {
            return Err(FontError::EmptyCatalog);
        }

        tracing::info!(fonts = response.items.len(), "Fetched font catalog");
        Ok(Arc::new(response.items))
    }

    /// The cached catalog, without touching the network
    pub fn cached(&self) -> Option<Arc<Vec<GoogleFont>>> {
        self.cache.get().cloned()
    }

    /// Find a family in the catalog (or fallback list)
    pub async fn find(&self, family: &str) -> Option<GoogleFont> {
        self.fetch()
            .await
            .iter()
            .find(|font| font.family == family)
            .cloned()
    }

    /// Case-insensitive substring search, capped to `limit` entries
    pub async fn search(&self, term: &str, limit: usize) -> Vec<GoogleFont> {
        let needle = term.trim().to_lowercase();
        self.fetch()
            .await
            .iter()
            .filter(|font| needle.is_empty() || font.family.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }
}
