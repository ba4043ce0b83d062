//! Display projection of a comparison.
//!
//! Pure derivation of UI groupings from the current products, their spec
//! diff, and the fetched store lists. No network, no mutation; render code
//! consumes these values as-is.

use crate::diff::{KeyDiff, SpecDiff};
use crate::ids::ProductId;
use crate::product::{Product, VoteAggregate};
use crate::stores::AffiliateStore;
use std::collections::HashMap;

/// Maximum number of grid columns on any viewport.
pub const MAX_GRID_COLUMNS: usize = 4;

/// Grid column count for a product count: one column per product, capped.
pub fn grid_columns(product_count: usize) -> usize {
    product_count.clamp(1, MAX_GRID_COLUMNS)
}

/// Summary card for one compared product.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub rating: Option<VoteAggregate>,
    /// Ranked store list; empty when the affiliate fetch failed or the
    /// product has no listed retailers.
    pub stores: Vec<AffiliateStore>,
}

impl SummaryCard {
    fn for_product(product: &Product, stores: &HashMap<ProductId, Vec<AffiliateStore>>) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.name.clone(),
            category: product.category.name.clone(),
            rating: product.votes,
            stores: stores.get(&product.id).cloned().unwrap_or_default(),
        }
    }
}

/// One row of the specification table.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRow {
    pub key: String,
    /// Display value per product, column order. Absent values are empty.
    pub values: Vec<String>,
    /// Row should be visually highlighted as a difference.
    pub highlight: bool,
}

/// Full comparison grid for two or more products.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonGrid {
    pub columns: usize,
    pub cards: Vec<SummaryCard>,
    pub rows: Vec<SpecRow>,
    /// Capped list of difference keys for the summary strip.
    pub top_differences: Vec<String>,
}

/// What the comparison page should render.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonView {
    /// Nothing selected; show the search/empty state.
    Empty,
    /// One product selected; prompt the user to add more.
    Single(SummaryCard),
    /// Two or more products; the full side-by-side grid.
    Grid(ComparisonGrid),
}

impl ComparisonView {
    /// Whether the full comparison UI (vs. prompting UI) is shown.
    pub fn is_comparison(&self) -> bool {
        matches!(self, Self::Grid(_))
    }
}

/// Project products + diff + store lists into the display view.
pub fn project(
    products: &[Product],
    diff: &SpecDiff,
    stores: &HashMap<ProductId, Vec<AffiliateStore>>,
) -> ComparisonView {
    match products {
        [] => ComparisonView::Empty,
        [single] => ComparisonView::Single(SummaryCard::for_product(single, stores)),
        _ => {
            let cards = products
                .iter()
                .map(|p| SummaryCard::for_product(p, stores))
                .collect();
            let rows = diff
                .keys
                .iter()
                .filter(|key| key.values.iter().any(|v| !v.is_empty()))
                .map(|key: &KeyDiff| SpecRow {
                    key: key.key.clone(),
                    values: key.values.clone(),
                    highlight: key.present_in_all && key.values_differ,
                })
                .collect();
            let top_differences = diff
                .top_differences()
                .into_iter()
                .map(|key| key.key.clone())
                .collect();

            ComparisonView::Grid(ComparisonGrid {
                columns: grid_columns(products.len()),
                cards,
                rows,
                top_differences,
            })
        }
    }
}
