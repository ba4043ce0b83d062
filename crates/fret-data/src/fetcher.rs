//! Comparison payload and affiliate-store fetching.
//!
//! The comparison payload is one request; affiliate-store lists fan out as
//! one independent request per product. The fan-out runs concurrently and
//! failures stay isolated: one product's failed store fetch never blocks
//! the others from rendering.

use crate::cache::StoreCache;
use crate::client::ApiClient;
use crate::error::FetchError;
use fret_core::{AffiliateStore, ComparisonPayload, ProductId};
use futures::future::join_all;
use std::collections::HashMap;
use tracing::warn;

/// A comparison needs at least this many products.
pub const MIN_COMPARISON_PRODUCTS: usize = 2;

/// Fetch the merged comparison payload for two or more resolved ids.
pub async fn fetch_comparison(
    client: &ApiClient,
    ids: &[ProductId],
) -> Result<ComparisonPayload, FetchError> {
    if ids.len() < MIN_COMPARISON_PRODUCTS {
        return Err(FetchError::InsufficientProducts(ids.len()));
    }
    client.compare(ids).await
}

/// Fetch the affiliate-store list for every product, read-through the
/// session cache.
///
/// Cache misses are fetched concurrently. A failed fetch degrades to an
/// empty list for that product only and is not cached, so a later
/// user-initiated refresh retries it.
pub async fn fetch_store_lists(
    client: &ApiClient,
    cache: &StoreCache,
    ids: &[ProductId],
) -> HashMap<ProductId, Vec<AffiliateStore>> {
    let misses: Vec<ProductId> = ids
        .iter()
        .copied()
        .filter(|id| !cache.contains(*id))
        .collect();

    let fetched = join_all(misses.iter().map(|id| client.affiliate_stores(*id))).await;
    for (id, result) in misses.into_iter().zip(fetched) {
        match result {
            Ok(stores) => cache.insert(id, stores),
            Err(err) => {
                warn!(product = %id, error = %err, "affiliate-store fetch failed, degrading to empty list");
            }
        }
    }

    ids.iter()
        .map(|id| (*id, cache.get(*id).unwrap_or_default()))
        .collect()
}
