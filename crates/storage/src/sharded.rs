//! In-memory document store
//!
//! DashMap keyed by document id. Reads clone the stored document out of
//! its shard; writes lock only the target shard.
//!
//! # CAS
//!
//! CAS values come from one store-wide `AtomicU64`, so every write gets a
//! value no other write has seen. CAS 0 is never handed out.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use subdoc_core::{Cas, DocId, Error, JsonValue, Result};
use tracing::{debug, warn};

use crate::document::{DocumentContent, StoredDocument};
use crate::store::DocumentStore;

/// DashMap-backed [`DocumentStore`]
#[derive(Debug)]
pub struct InMemoryStore {
    documents: DashMap<DocId, StoredDocument>,
    /// Last CAS handed out
    cas: AtomicU64,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            cas: AtomicU64::new(0),
        }
    }

    /// Create with room for `capacity` documents
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            documents: DashMap::with_capacity(capacity),
            cas: AtomicU64::new(0),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Check whether a document exists
    pub fn contains(&self, id: &DocId) -> bool {
        self.documents.contains_key(id)
    }

    #[inline]
    fn next_cas(&self) -> Cas {
        Cas::new(self.cas.fetch_add(1, Ordering::AcqRel) + 1)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryStore {
    fn read(&self, id: &DocId) -> Result<Option<StoredDocument>> {
        Ok(self.documents.get(id).map(|doc| doc.value().clone()))
    }

    fn write_if_match(&self, id: &DocId, value: JsonValue, expected: Cas) -> Result<Cas> {
        // get_mut holds the shard lock across the compare and the write
        let mut doc = self
            .documents
            .get_mut(id)
            .ok_or_else(|| Error::DocumentNotFound(id.clone()))?;
        if doc.cas != expected {
            warn!(
                target: "subdoc::store",
                doc_id = %id,
                expected = %expected,
                actual = %doc.cas,
                "CAS mismatch on write"
            );
            return Err(Error::CasMismatch {
                expected,
                actual: doc.cas,
            });
        }
        let cas = self.next_cas();
        *doc = StoredDocument::new(value, cas);
        debug!(target: "subdoc::store", doc_id = %id, cas = %cas, "document replaced");
        Ok(cas)
    }

    fn insert(&self, id: &DocId, content: DocumentContent) -> Result<Cas> {
        match self.documents.entry(id.clone()) {
            Entry::Occupied(_) => Err(Error::DocumentExists(id.clone())),
            Entry::Vacant(slot) => {
                let cas = self.next_cas();
                slot.insert(StoredDocument::new(content, cas));
                debug!(target: "subdoc::store", doc_id = %id, cas = %cas, "document inserted");
                Ok(cas)
            }
        }
    }

    fn upsert(&self, id: &DocId, content: DocumentContent) -> Result<Cas> {
        let cas = self.next_cas();
        self.documents
            .insert(id.clone(), StoredDocument::new(content, cas));
        debug!(target: "subdoc::store", doc_id = %id, cas = %cas, "document upserted");
        Ok(cas)
    }

    fn remove(&self, id: &DocId) -> Result<bool> {
        let removed = self.documents.remove(id).is_some();
        if removed {
            debug!(target: "subdoc::store", doc_id = %id, "document removed");
        }
        Ok(removed)
    }
}
