//! # ShapeId
//!
//! Identity token for a shape.
//!
//! Ids are opaque strings. Callers may supply their own, otherwise one is
//! generated as `<prefix><uuid v4>`. Uniqueness is not enforced here; the
//! token exists for lookup, not for geometric equality.

use std::borrow::Borrow;

use serde::Serialize;
use uuid::Uuid;

/// Default prefix for generated ids
pub const DEFAULT_ID_PREFIX: &str = "tetrahedron_";

/// Identity token for a shape
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    /// Wrap a caller-supplied id verbatim
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id with the default `tetrahedron_` prefix
    pub fn generate() -> Self {
        Self::generate_with(DEFAULT_ID_PREFIX)
    }

    /// Generate a fresh id with a custom prefix
    pub fn generate_with(prefix: &str) -> Self {
        Self(format!("{}{}", prefix, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ShapeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ShapeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ShapeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
