//! Domain model and comparison logic for FretCompare.
//!
//! This crate holds everything that needs no network access:
//!
//! - **Identifiers**: typed product ids, slugs, and the token parsing that
//!   decides whether user input is an id or a slug
//! - **Products**: retailable items with schema-less specification maps
//! - **Diffing**: the pure derivation of common and differing specification
//!   keys across a comparison set
//! - **Projection**: display-ready groupings (summary cards, spec rows,
//!   grid layout) derived from products and their diff
//!
//! # Example
//!
//! ```rust,ignore
//! use fret_core::prelude::*;
//!
//! let diff = SpecDiff::compute(&products, payload.matrix.as_ref());
//! for key in diff.top_differences() {
//!     println!("{} differs: {:?}", key.key, key.values);
//! }
//!
//! let view = project(&products, &diff, &store_lists);
//! ```

pub mod diff;
pub mod ids;
pub mod product;
pub mod projection;
pub mod stores;

pub use diff::{ComparisonMatrix, ComparisonPayload, KeyDiff, MatrixRow, SpecDiff};
pub use ids::{all_numeric, IdentifierToken, ProductId, Slug};
pub use product::{BrandRef, CategoryRef, Product, ProductContent, QaPair, StorePrice, VoteAggregate};
pub use projection::{grid_columns, project, ComparisonGrid, ComparisonView, SpecRow, SummaryCard};
pub use stores::{AffiliateStore, StoreRef};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::diff::{ComparisonMatrix, ComparisonPayload, KeyDiff, SpecDiff};
    pub use crate::ids::{IdentifierToken, ProductId, Slug};
    pub use crate::product::{BrandRef, CategoryRef, Product, ProductContent, VoteAggregate};
    pub use crate::projection::{grid_columns, project, ComparisonGrid, ComparisonView, SummaryCard};
    pub use crate::stores::AffiliateStore;
}
