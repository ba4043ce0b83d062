//! Backend API client, identifier resolution, and data fetching for
//! FretCompare.
//!
//! Everything that talks to the network lives here, behind the [`Transport`]
//! seam so the rest of the system can be driven by an in-memory transport in
//! tests:
//!
//! - [`ApiClient`]: typed methods over the backend REST surface
//! - [`resolver`]: raw URL/user tokens to canonical product ids
//! - [`fetcher`]: the merged comparison payload and the per-product
//!   affiliate-store fan-out
//! - [`StoreCache`]: session-scoped, injected read-through cache for
//!   affiliate-store lists
//!
//! # Example
//!
//! ```rust,ignore
//! use fret_data::{ApiClient, ApiConfig, StoreCache};
//! use fret_data::resolver::resolve_tokens;
//!
//! let client = ApiClient::over_http(&ApiConfig::default())?;
//! let cache = StoreCache::new();
//!
//! let resolution = resolve_tokens(&client, &tokens).await;
//! if let Some(ids) = resolution.comparison_ids() {
//!     let payload = fret_data::fetcher::fetch_comparison(&client, ids).await?;
//!     let stores = fret_data::fetcher::fetch_store_lists(&client, &cache, ids).await;
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
mod error;
pub mod fetcher;
pub mod resolver;
pub mod testing;
pub mod transport;

pub use cache::StoreCache;
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::FetchError;
pub use resolver::{resolve_tokens, Resolution};
pub use transport::{HttpTransport, Transport};
