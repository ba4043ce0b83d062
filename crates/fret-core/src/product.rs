//! Product records and their schema-less specification maps.
//!
//! Specifications have no fixed shape: two products in the same category may
//! expose disjoint key sets, and values are loosely typed (strings, numbers,
//! the occasional flag). Everything downstream operates over key sets
//! discovered at runtime, never a fixed struct.

use crate::ids::{ProductId, Slug};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Brand reference (name + slug).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRef {
    pub name: String,
    pub slug: Slug,
}

/// Category reference (name + slug).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    pub slug: Slug,
}

/// Aggregated community votes for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoteAggregate {
    /// Average rating, backend scale (typically 0-5).
    pub average: f64,
    /// Number of votes behind the average.
    pub count: u32,
}

/// A backend-recorded store price snapshot.
///
/// Distinct from the live affiliate-store lists, which are fetched per
/// product at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePrice {
    pub store: String,
    pub price: f64,
    pub currency: String,
}

/// One question/answer pair from the editorial content blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Editorial content attached to some products: professional ratings,
/// audience-fit hints, comparison helper lists, and Q&A.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductContent {
    /// Professional ratings keyed by aspect (e.g. "build quality").
    #[serde(default)]
    pub pro_ratings: Map<String, Value>,
    /// Who the product suits (e.g. "beginners", "gigging players").
    #[serde(default)]
    pub best_for: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub questions: Vec<QaPair>,
    /// Extra specification keys surfaced only in content.
    #[serde(default)]
    pub specs: Map<String, Value>,
}

/// A retailable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable numeric identifier.
    pub id: ProductId,
    /// URL slug; not stable across renames.
    pub slug: Slug,
    pub name: String,
    pub brand: BrandRef,
    pub category: CategoryRef,
    /// Free-form specification mapping; key sets vary per category.
    #[serde(default)]
    pub specs: Map<String, Value>,
    /// Optional editorial content blob.
    #[serde(default)]
    pub content: Option<ProductContent>,
    /// Optional backend price snapshots.
    #[serde(default)]
    pub prices: Option<Vec<StorePrice>>,
    /// Optional vote aggregate.
    #[serde(default)]
    pub votes: Option<VoteAggregate>,
}

impl Product {
    /// Display value for a specification key.
    ///
    /// Looks through the spec map first, then the embedded content specs.
    /// Absent or null values render as the empty string.
    pub fn spec_display(&self, key: &str) -> String {
        self.spec_value(key).map(display_value).unwrap_or_default()
    }

    fn spec_value(&self, key: &str) -> Option<&Value> {
        self.specs.get(key).or_else(|| {
            self.content
                .as_ref()
                .and_then(|content| content.specs.get(key))
        })
    }

    /// Iterate all specification keys this product exposes, spec map keys
    /// first, then content-only keys, in backend order.
    pub fn spec_keys(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str).chain(
            self.content
                .iter()
                .flat_map(|content| content.specs.keys().map(String::as_str)),
        )
    }
}

/// Render a loosely-typed spec value for display and comparison.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
