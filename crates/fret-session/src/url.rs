//! URL-state codec and history observer.
//!
//! The comparison is shareable and bookmarkable: membership is mirrored
//! into a single query parameter holding a comma-separated token list.
//! Encoding prefers slugs; products without a usable slug fall back to
//! their decimal id. Parsing tolerates the same mixed numeric/slug
//! ambiguity as the resolver.

use fret_core::{Product, ProductId};

/// Preferred query parameter.
pub const PRODUCTS_PARAM: &str = "products";

/// Accepted on read for older shared links.
const LEGACY_IDS_PARAM: &str = "ids";

/// Extract the raw comparison tokens from a query string.
///
/// Accepts `products=` (preferred) or `ids=` (legacy); a leading `?` is
/// tolerated. Unknown parameters are ignored.
pub fn parse_query(query: &str) -> Vec<String> {
    let query = query.trim_start_matches('?');
    let value_of = |param: &str| {
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == param).then_some(value)
        })
    };

    let value = match value_of(PRODUCTS_PARAM).or_else(|| value_of(LEGACY_IDS_PARAM)) {
        Some(value) => value,
        None => return Vec::new(),
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Encode the current membership into the parameter value.
///
/// One token per member, set order: the product's slug when a record with a
/// usable slug is on hand, the decimal id otherwise (e.g. when the record
/// fetch failed mid-session).
pub fn encode_members(ids: &[ProductId], products: &[Product]) -> String {
    ids.iter()
        .map(|id| {
            products
                .iter()
                .find(|p| p.id == *id)
                .filter(|p| !p.slug.is_empty())
                .map(|p| p.slug.to_string())
                .unwrap_or_else(|| id.to_string())
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Full query string for a parameter value; empty value clears the URL
/// state entirely.
pub fn query_string(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{PRODUCTS_PARAM}={value}")
    }
}

/// Observer for shallow navigation.
///
/// The session pushes one entry per distinct comparison; implementations
/// rewrite the address bar without a full page reload. The equality check
/// in `ComparisonSet::replace_all` keeps the write -> read -> write cycle
/// from looping.
pub trait HistoryWriter {
    /// Rewrite the page query string (no reload).
    fn push_query(&mut self, query: &str);
}

/// Recording writer used by tests and headless embedding.
#[derive(Debug, Default)]
pub struct RecordingHistory {
    entries: Vec<String>,
}

impl RecordingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The query currently in the address bar, if any was pushed.
    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Every pushed entry, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl HistoryWriter for RecordingHistory {
    fn push_query(&mut self, query: &str) {
        self.entries.push(query.to_string());
    }
}
