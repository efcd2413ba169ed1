//! Document store contract
//!
//! The engine reads a snapshot with [`DocumentStore::read`] and writes the
//! evaluated document back with [`DocumentStore::write_if_match`]. The
//! compare and the swap must be one atomic step inside the store.

use crate::document::{DocumentContent, StoredDocument};
use subdoc_core::{Cas, DocId, JsonValue, Result};

/// Storage abstraction for whole documents
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
///
/// Stores backed by something that can fail (a disk, a remote service)
/// report those failures as `Error::Storage`; [`InMemoryStore`] never does.
///
/// [`InMemoryStore`]: crate::InMemoryStore
pub trait DocumentStore: Send + Sync {
    /// Read the current document and its CAS
    ///
    /// Returns None if no document is stored under `id`.
    fn read(&self, id: &DocId) -> Result<Option<StoredDocument>>;

    /// Replace a JSON document if its CAS still equals `expected`
    ///
    /// Returns the new CAS.
    ///
    /// # Errors
    ///
    /// - `Error::DocumentNotFound` if the document was removed
    /// - `Error::CasMismatch` if the stored CAS differs from `expected`
    fn write_if_match(&self, id: &DocId, value: JsonValue, expected: Cas) -> Result<Cas>;

    /// Store a new document; fails if one exists
    ///
    /// # Errors
    ///
    /// Returns `Error::DocumentExists` if `id` is taken.
    fn insert(&self, id: &DocId, content: DocumentContent) -> Result<Cas>;

    /// Store a document unconditionally, returning the new CAS
    fn upsert(&self, id: &DocId, content: DocumentContent) -> Result<Cas>;

    /// Delete a document, returning whether one existed
    fn remove(&self, id: &DocId) -> Result<bool>;
}
