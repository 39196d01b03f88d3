//! Font stylesheet requests and `@font-face` source extraction.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Characters left alone by JavaScript's `encodeURIComponent`
const FAMILY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn source_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"url\(\s*['"]?([^'")\s]+)['"]?\s*\)"#).expect("font source pattern is valid")
    })
}

/// `{base}?family=Open%20Sans:wght@400;700&display=swap`
pub fn stylesheet_url(base: &str, family: &str, weights: &[String]) -> String {
    let family = utf8_percent_encode(family, FAMILY_ENCODE_SET);
    if weights.is_empty() {
        format!("{base}?family={family}&display=swap")
    } else {
        format!(
            "{base}?family={family}:wght@{}&display=swap",
            weights.join(";")
        )
    }
}

/// Upright numeric weights from catalog variants (`regular` is 400).
///
/// Italic variants are dropped. Falls back to `defaults` when nothing
/// usable remains.
pub fn weights_from_variants(variants: &[String], defaults: &[String]) -> Vec<String> {
    let mut weights: Vec<u16> = variants
        .iter()
        .filter_map(|variant| match variant.as_str() {
            "regular" => Some(400),
            other => other.parse().ok(),
        })
        .collect();
    weights.sort_unstable();
    weights.dedup();

    if weights.is_empty() {
        defaults.to_vec()
    } else {
        weights.iter().map(u16::to_string).collect()
    }
}

/// Every distinct `url(...)` referenced by the stylesheet, in order.
pub fn font_sources(css: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    source_pattern()
        .captures_iter(css)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
