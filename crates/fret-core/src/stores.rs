//! Affiliate store listings.

use crate::ids::Slug;
use serde::{Deserialize, Serialize};

/// One retailer offering a product.
///
/// The outbound URL is already affiliate-tagged by the backend. Lists are
/// per product and ranked by position; they are never merged across
/// products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffiliateStore {
    /// Retailer display name.
    pub store: String,
    /// Affiliate-tagged outbound URL.
    pub url: String,
    /// Whether the retailer currently lists the product.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// An entry in the store directory (`GET /affiliate-stores`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRef {
    pub name: String,
    pub slug: Slug,
}
