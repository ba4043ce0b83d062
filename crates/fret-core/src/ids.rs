//! Typed identifiers and token parsing.
//!
//! Products are addressable two ways: by their stable numeric id, and by a
//! human-readable slug that can change when a product is renamed. Incoming
//! URL and user input is a list of raw tokens that may mix both forms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, backend-assigned numeric product identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create an id from its numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Human-readable, URL-safe product or taxonomy slug.
///
/// Slugs are not guaranteed stable across renames; the numeric [`ProductId`]
/// is the canonical identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Create a slug from a string.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Get the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the slug carries any text at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Slug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Slug {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single user- or URL-supplied identifier token.
///
/// A token that parses in full as an unsigned integer is an id; anything
/// else non-empty is a slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentifierToken {
    /// Purely numeric token, interpreted as a product id.
    Id(ProductId),
    /// Non-numeric token, requires slug resolution.
    Slug(Slug),
}

impl IdentifierToken {
    /// Parse a raw token. Empty or whitespace-only input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<u64>() {
            Ok(id) => Some(Self::Id(ProductId::new(id))),
            Err(_) => Some(Self::Slug(Slug::new(raw))),
        }
    }

    /// Parse a batch of raw tokens, dropping empty ones.
    pub fn parse_batch<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<Self> {
        raw.into_iter().filter_map(Self::parse).collect()
    }

    /// The id, when this token is numeric.
    pub fn as_id(&self) -> Option<ProductId> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Slug(_) => None,
        }
    }
}

impl fmt::Display for IdentifierToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => write!(f, "{slug}"),
        }
    }
}

/// A batch is fully numeric only when every token parsed as an id.
///
/// One slug in the batch demotes the whole batch to slug resolution,
/// numeric-looking tokens included.
pub fn all_numeric(tokens: &[IdentifierToken]) -> bool {
    !tokens.is_empty() && tokens.iter().all(|t| matches!(t, IdentifierToken::Id(_)))
}
