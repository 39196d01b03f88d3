use serde::{Deserialize, Serialize};

/// One family from the remote font catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleFont {
    pub family: String,
    /// Weight/style tokens in catalog order, e.g. `regular`, `700`, `700italic`
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub subsets: Vec<String>,
    #[serde(default)]
    pub category: String,
}

impl GoogleFont {
    /// Entry used when the catalog is unavailable
    pub fn fallback(family: &str) -> Self {
        Self {
            family: family.to_string(),
            variants: vec!["400".to_string(), "700".to_string()],
            subsets: vec!["latin".to_string()],
            category: "sans-serif".to_string(),
        }
    }
}

/// Catalog response body: `{"items": [...]}`
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub items: Vec<GoogleFont>,
}
