//! Session-scoped affiliate-store cache.

use fret_core::{AffiliateStore, ProductId};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Read-through cache of affiliate-store lists, keyed by product id.
///
/// The cache is owned by the comparison session and injected into the
/// fetcher rather than living in process-global state. Entries are never
/// invalidated within a session: affiliate links are treated as
/// session-stable. Failed fetches are deliberately not cached, so a
/// user-initiated re-trigger retries them.
#[derive(Debug, Default)]
pub struct StoreCache {
    entries: Mutex<HashMap<ProductId, Vec<AffiliateStore>>>,
}

impl StoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a list (possibly empty) has been cached for this product.
    pub fn contains(&self, id: ProductId) -> bool {
        self.lock().contains_key(&id)
    }

    /// Cached list for a product, if any.
    pub fn get(&self, id: ProductId) -> Option<Vec<AffiliateStore>> {
        self.lock().get(&id).cloned()
    }

    /// Cache the fetched list for a product.
    pub fn insert(&self, id: ProductId, stores: Vec<AffiliateStore>) {
        self.lock().insert(id, stores);
    }

    /// Number of cached products.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ProductId, Vec<AffiliateStore>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str) -> AffiliateStore {
        AffiliateStore {
            store: name.to_string(),
            url: format!("https://redirect.example/{name}"),
            available: true,
        }
    }

    #[test]
    fn read_through_semantics() {
        let cache = StoreCache::new();
        let id = ProductId::new(1);
        assert!(!cache.contains(id));
        assert_eq!(cache.get(id), None);

        cache.insert(id, vec![store("thomann")]);
        assert!(cache.contains(id));
        assert_eq!(cache.get(id).unwrap().len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn an_empty_list_still_counts_as_cached() {
        let cache = StoreCache::new();
        let id = ProductId::new(2);
        cache.insert(id, Vec::new());
        assert!(cache.contains(id));
        assert_eq!(cache.get(id), Some(Vec::new()));
    }
}
