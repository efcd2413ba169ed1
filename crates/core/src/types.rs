//! Core identifier types
//!
//! This module defines the identifiers shared between the engine and the
//! document store:
//! - DocId: Identifier of a stored document
//! - Cas: Opaque compare-and-swap token attached to every stored document

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a document in the store
///
/// A thin wrapper around the document key. Sub-document batches always
/// target exactly one `DocId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Create a document identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Compare-and-swap token
///
/// Every write to a document assigns it a fresh `Cas`. A conditional write
/// succeeds only if the caller's token equals the document's current token.
/// Tokens are opaque: only equality is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cas(u64);

impl Cas {
    /// Token for a document that does not exist; stores never assign it
    pub const ABSENT: Cas = Cas(0);

    /// Create a token from its raw value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw token value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Cas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
