//! Fetch error types.

use thiserror::Error;

/// Errors that can occur talking to the backend API.
///
/// All of these are non-fatal to the page: callers retain previous state
/// and surface a transient notice rather than crashing.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-2xx response.
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    /// Connection-level failure (DNS, refused, reset).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body did not match the expected shape.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Request could not be constructed or sent.
    #[error("Request error: {0}")]
    Request(String),

    /// Slug lookup matched no product.
    #[error("No product found for slug: {0}")]
    SlugNotFound(String),

    /// A comparison fetch needs at least two products.
    #[error("Comparison requires at least 2 products, got {0}")]
    InsufficientProducts(usize),
}
