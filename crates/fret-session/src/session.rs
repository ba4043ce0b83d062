//! The comparison session facade.
//!
//! Owns the comparison set, the fetched data, and the URL mirror, and
//! drives the flow between them with explicit transitions instead of
//! reactive re-execution: user actions and URL changes call named methods,
//! the set reports what changed, and the session decides whether to fetch
//! and whether to rewrite the URL.
//!
//! Network failures never escape this type. A failed refresh keeps the
//! previously displayed comparison on screen and records a transient,
//! dismissible notice; retry is user-initiated.

use crate::set::{same_id_set, ComparisonSet, SetState, Transition, Viewport};
use crate::url::{encode_members, parse_query, query_string, HistoryWriter};
use fret_core::{
    project, AffiliateStore, ComparisonView, IdentifierToken, Product, ProductId, SpecDiff,
};
use fret_data::fetcher::{fetch_comparison, fetch_store_lists};
use fret_data::resolver::resolve_tokens;
use fret_data::{ApiClient, StoreCache};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Transient notice shown when a refresh fails and the previous view is
/// retained.
pub const REFRESH_FAILED_NOTICE: &str =
    "Could not refresh the comparison. Showing the last loaded results.";

/// The comparison session manager.
///
/// One instance per comparison page visit. The affiliate-store cache is
/// injected so it can be scoped (and inspected) by the embedder.
pub struct ComparisonSession<H: HistoryWriter> {
    client: ApiClient,
    cache: StoreCache,
    set: ComparisonSet,
    history: H,
    /// Committed product records, set order.
    products: Vec<Product>,
    diff: SpecDiff,
    stores: HashMap<ProductId, Vec<AffiliateStore>>,
    notice: Option<String>,
}

impl<H: HistoryWriter> ComparisonSession<H> {
    /// Create an empty session.
    pub fn new(client: ApiClient, cache: StoreCache, viewport: Viewport, history: H) -> Self {
        Self {
            client,
            cache,
            set: ComparisonSet::new(viewport),
            history,
            products: Vec::new(),
            diff: SpecDiff::default(),
            stores: HashMap::new(),
            notice: None,
        }
    }

    /// Initial population from the page URL (server-supplied query string).
    ///
    /// Does not write the URL back: the address bar already holds it.
    pub async fn hydrate(&mut self, query: &str) {
        self.sync_from_query(query).await;
    }

    /// Externally triggered URL change: back/forward navigation, an edited
    /// address bar, or a shared link.
    ///
    /// When the incoming membership equals the current one the call is a
    /// no-op and no fetch is issued; that equality check is the loop
    /// breaker between URL sync and the controller.
    pub async fn handle_url_change(&mut self, query: &str) {
        self.sync_from_query(query).await;
    }

    async fn sync_from_query(&mut self, query: &str) {
        let tokens = parse_query(query);
        let resolution = resolve_tokens(&self.client, &tokens).await;
        let transition = self.set.replace_all(resolution.ids().to_vec());
        if transition.changed() {
            self.refresh().await;
        }
    }

    /// Add a product by id.
    pub async fn add(&mut self, id: ProductId) {
        let transition = self.set.add(id);
        self.after_mutation(transition).await;
    }

    /// Resolve a raw token (numeric id or slug) and add it.
    ///
    /// A token that resolves to nothing is logged and dropped, matching
    /// the resolver's per-token failure policy.
    pub async fn add_token(&mut self, raw: &str) {
        match IdentifierToken::parse(raw) {
            Some(IdentifierToken::Id(id)) => self.add(id).await,
            Some(IdentifierToken::Slug(slug)) => {
                match self.client.product_by_slug(slug.as_str()).await {
                    Ok(product) => self.add(product.id).await,
                    Err(err) => {
                        warn!(token = %slug, error = %err, "add-token resolution failed, dropping");
                    }
                }
            }
            None => {}
        }
    }

    /// Remove a product. Dropping below two products collapses the
    /// comparison to the empty state.
    pub async fn remove(&mut self, id: ProductId) {
        let transition = self.set.remove(id);
        self.after_mutation(transition).await;
    }

    /// Empty the comparison and reset the URL state.
    pub fn clear(&mut self) {
        if self.set.clear().changed() {
            self.reset_view();
            self.history.push_query("");
        }
    }

    async fn after_mutation(&mut self, transition: Transition) {
        if !transition.changed() {
            return;
        }
        if let Transition::Added { evicted: Some(id) } = &transition {
            debug!(evicted = %id, "capacity eviction");
        }
        self.refresh().await;
        self.sync_url();
    }

    /// Re-fetch whatever the current set state needs.
    async fn refresh(&mut self) {
        match self.set.state() {
            SetState::Empty => self.reset_view(),
            SetState::Single => self.refresh_single().await,
            SetState::Comparison => self.refresh_comparison().await,
        }
    }

    async fn refresh_single(&mut self) {
        let id = self.set.ids()[0];

        let product = match self.products.iter().find(|p| p.id == id) {
            Some(product) => product.clone(),
            None => match self.client.product_by_id(id).await {
                Ok(product) => product,
                Err(err) => {
                    warn!(product = %id, error = %err, "single-product fetch failed");
                    self.notice = Some(REFRESH_FAILED_NOTICE.to_string());
                    return;
                }
            },
        };

        let stores = fetch_store_lists(&self.client, &self.cache, &[id]).await;
        self.products = vec![product];
        self.diff = SpecDiff::default();
        self.stores = stores;
    }

    async fn refresh_comparison(&mut self) {
        let ids = self.set.ids().to_vec();

        let payload = match fetch_comparison(&self.client, &ids).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(?ids, error = %err, "comparison fetch failed, retaining previous state");
                self.notice = Some(REFRESH_FAILED_NOTICE.to_string());
                return;
            }
        };

        // In-flight requests are not cancelled; a response for a set the
        // user has since changed is discarded instead of committed.
        if !same_id_set(&ids, self.set.ids()) {
            debug!(?ids, "discarding stale comparison response");
            return;
        }

        let stores = fetch_store_lists(&self.client, &self.cache, &ids).await;

        // Commit in set order; products the backend did not return are
        // simply absent from the view.
        let products: Vec<Product> = ids
            .iter()
            .filter_map(|id| payload.products.iter().find(|p| p.id == *id).cloned())
            .collect();
        self.diff = SpecDiff::compute(&products, payload.matrix.as_ref());
        self.products = products;
        self.stores = stores;
    }

    fn reset_view(&mut self) {
        self.products.clear();
        self.diff = SpecDiff::default();
        self.stores.clear();
    }

    /// Mirror the current membership into the URL.
    fn sync_url(&mut self) {
        let value = encode_members(self.set.ids(), &self.products);
        self.history.push_query(&query_string(&value));
    }

    /// Current display projection.
    pub fn view(&self) -> ComparisonView {
        project(&self.products, &self.diff, &self.stores)
    }

    /// Current membership, addition order.
    pub fn ids(&self) -> &[ProductId] {
        self.set.ids()
    }

    /// Pending transient notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Dismiss the transient notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The history writer, for embedders that own the address bar.
    pub fn history(&self) -> &H {
        &self.history
    }
}
