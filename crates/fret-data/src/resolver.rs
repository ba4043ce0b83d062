//! Identifier resolution: raw tokens to canonical product ids.
//!
//! Tokens come from the URL or user input and may mix numeric ids with
//! slugs. A batch where every token is numeric resolves locally with no
//! network calls; one slug in the batch demotes the whole batch to slug
//! lookup, numeric-looking tokens included (a product's slug can itself
//! look like a number).

use crate::client::ApiClient;
use fret_core::{all_numeric, IdentifierToken, ProductId};
use futures::future::join_all;
use tracing::warn;

/// Outcome of resolving a token batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing resolved; the page shows its empty/search state.
    Empty,
    /// Exactly one product: not yet a comparison, prompt for more.
    Single(ProductId),
    /// Two or more products, ready for the comparison fetch.
    Comparison(Vec<ProductId>),
}

impl Resolution {
    fn from_ids(ids: Vec<ProductId>) -> Self {
        match ids.len() {
            0 => Self::Empty,
            1 => Self::Single(ids[0]),
            _ => Self::Comparison(ids),
        }
    }

    /// All resolved ids, input order.
    pub fn ids(&self) -> &[ProductId] {
        match self {
            Self::Empty => &[],
            Self::Single(id) => std::slice::from_ref(id),
            Self::Comparison(ids) => ids,
        }
    }

    /// The ids, but only when there are enough of them to compare.
    pub fn comparison_ids(&self) -> Option<&[ProductId]> {
        match self {
            Self::Comparison(ids) => Some(ids),
            _ => None,
        }
    }
}

/// Resolve raw tokens into product ids.
///
/// Order follows the input; duplicates collapse onto their first
/// occurrence. Slug lookups run concurrently and fail independently: a
/// token that resolves to nothing is logged and skipped, never aborting
/// the rest of the batch.
pub async fn resolve_tokens(client: &ApiClient, raw: &[String]) -> Resolution {
    let tokens = IdentifierToken::parse_batch(raw.iter().map(String::as_str));
    if tokens.is_empty() {
        return Resolution::Empty;
    }

    let ids = if all_numeric(&tokens) {
        tokens.iter().filter_map(IdentifierToken::as_id).collect()
    } else {
        let lookups = tokens.iter().map(|token| {
            let slug = token.to_string();
            async move { client.product_by_slug(&slug).await }
        });
        let results = join_all(lookups).await;

        let mut ids = Vec::with_capacity(tokens.len());
        for (token, result) in tokens.iter().zip(results) {
            match result {
                Ok(product) => ids.push(product.id),
                Err(err) => {
                    warn!(token = %token, error = %err, "token resolution failed, skipping");
                }
            }
        }
        ids
    };

    Resolution::from_ids(dedupe(ids))
}

fn dedupe(ids: Vec<ProductId>) -> Vec<ProductId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn product_json(id: u64, slug: &str) -> Value {
        json!([{
            "id": id,
            "slug": slug,
            "name": slug,
            "brand": {"name": "Fender", "slug": "fender"},
            "category": {"name": "Electric Guitars", "slug": "electric-guitars"}
        }])
    }

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn fully_numeric_batch_makes_no_network_calls() {
        let transport = MockTransport::new();
        let client = ApiClient::new(Arc::new(transport.clone()));

        let resolution = resolve_tokens(&client, &strings(&["12", "45"])).await;
        assert_eq!(
            resolution,
            Resolution::Comparison(vec![ProductId::new(12), ProductId::new(45)])
        );
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn mixed_batch_slug_resolves_every_token() {
        let transport = MockTransport::new();
        transport.stub("GET /products?slugs=12", product_json(12, "12"));
        transport.stub(
            "GET /products?slugs=gibson-lp",
            product_json(9, "gibson-lp"),
        );
        let client = ApiClient::new(Arc::new(transport.clone()));

        let resolution = resolve_tokens(&client, &strings(&["12", "gibson-lp"])).await;
        assert_eq!(
            resolution,
            Resolution::Comparison(vec![ProductId::new(12), ProductId::new(9)])
        );
        // the numeric-looking token also went through slug lookup
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn failed_token_is_skipped_not_fatal() {
        let transport = MockTransport::new();
        transport.stub(
            "GET /products?slugs=fender-strat",
            product_json(7, "fender-strat"),
        );
        // "gone-product" is unstubbed -> 404
        let client = ApiClient::new(Arc::new(transport));

        let resolution =
            resolve_tokens(&client, &strings(&["fender-strat", "gone-product"])).await;
        assert_eq!(resolution, Resolution::Single(ProductId::new(7)));
        assert_eq!(resolution.comparison_ids(), None);
    }

    #[tokio::test]
    async fn all_tokens_failing_yields_empty() {
        let transport = MockTransport::new();
        let client = ApiClient::new(Arc::new(transport));

        let resolution = resolve_tokens(&client, &strings(&["nope", "also-nope"])).await;
        assert_eq!(resolution, Resolution::Empty);
        assert!(resolution.ids().is_empty());
    }

    #[tokio::test]
    async fn duplicates_collapse_onto_first_occurrence() {
        let transport = MockTransport::new();
        let client = ApiClient::new(Arc::new(transport));

        let resolution = resolve_tokens(&client, &strings(&["12", "45", "12"])).await;
        assert_eq!(
            resolution,
            Resolution::Comparison(vec![ProductId::new(12), ProductId::new(45)])
        );
    }

    #[tokio::test]
    async fn single_numeric_token_is_not_a_comparison() {
        let transport = MockTransport::new();
        let client = ApiClient::new(Arc::new(transport));

        let resolution = resolve_tokens(&client, &strings(&["12"])).await;
        assert_eq!(resolution, Resolution::Single(ProductId::new(12)));
    }
}
