//! Batch execution against a document store
//!
//! [`Collection`] is the boundary around the evaluators:
//!
//! 1. Check the batch size against the configured limit
//! 2. Read the document once (the snapshot)
//! 3. Evaluate the batch against the snapshot
//! 4. For mutations, swap the new document back with
//!    [`DocumentStore::write_if_match`] under the snapshot's CAS
//!
//! A concurrent writer between steps 2 and 4 makes step 4 fail with
//! `Error::CasMismatch`, including a writer that creates a document the
//! snapshot found missing. Nothing is retried here.

use crate::assemble::{lookup_outcome, mutation_outcome};
use crate::config::{StoreSemantics, SubdocConfig};
use crate::lookup::evaluate_lookups;
use crate::mutate::evaluate_mutations;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subdoc_core::{
    validate_batch_size, BatchOutcome, Cas, DocId, Error, JsonValue, LookupOp, MutateOp,
    OperationBatch, Result,
};
use subdoc_storage::{DocumentContent, DocumentStore, StoredDocument};
use tracing::{debug, warn};

/// Per-call options for [`Collection::mutate_in`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutateInOptions {
    /// Only apply if the stored CAS still equals this value
    pub cas: Option<Cas>,
    /// Override the configured store semantics
    pub store_semantics: Option<StoreSemantics>,
}

impl MutateInOptions {
    /// Require the stored CAS to equal `cas` (builder pattern)
    pub fn with_cas(mut self, cas: Cas) -> Self {
        self.cas = Some(cas);
        self
    }

    /// Use `semantics` for this call (builder pattern)
    pub fn with_store_semantics(mut self, semantics: StoreSemantics) -> Self {
        self.store_semantics = Some(semantics);
        self
    }
}

/// Sub-document access to the documents of one store
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use serde_json::json;
/// use subdoc_engine::{Collection, DocId, DocumentContent, DocumentStore, InMemoryStore,
///     JsonValue, LookupOp, MutateInOptions, MutateOp};
///
/// let store = Arc::new(InMemoryStore::new());
/// let id = DocId::new("customer123");
/// store.upsert(&id, DocumentContent::Json(JsonValue::from(json!({"logins": 0})))).unwrap();
///
/// let collection = Collection::new(store);
/// let outcome = collection
///     .mutate_in(&id, &[MutateOp::counter("logins", 1)], &MutateInOptions::default())
///     .unwrap();
/// assert_eq!(outcome.content_as::<i64>(0).unwrap(), 1);
///
/// let outcome = collection.lookup_in(&id, &[LookupOp::get("logins")]).unwrap();
/// assert_eq!(outcome.content_as::<i64>(0).unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct Collection<S: DocumentStore> {
    store: Arc<S>,
    config: SubdocConfig,
}

impl<S: DocumentStore> Collection<S> {
    /// Create a collection with the default configuration
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            config: SubdocConfig::default(),
        }
    }

    /// Create a collection with `config`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration is out of range.
    pub fn with_config(store: Arc<S>, config: SubdocConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The active configuration
    pub fn config(&self) -> &SubdocConfig {
        &self.config
    }

    /// Run a lookup batch against one snapshot of `id`
    ///
    /// Per-operation failures are reported in the outcome's results, not as
    /// an `Err`.
    ///
    /// # Errors
    ///
    /// - `Error::EmptyBatch` / `Error::TooManyOperations` for a bad batch size
    /// - `Error::DocumentNotFound` if `id` is absent
    /// - `Error::DocumentNotJson` if the document is binary
    pub fn lookup_in(&self, id: &DocId, ops: &[LookupOp]) -> Result<BatchOutcome> {
        validate_batch_size(ops.len(), self.config.max_operations)?;

        let snapshot = self
            .store
            .read(id)?
            .ok_or_else(|| Error::DocumentNotFound(id.clone()))?;
        let document = json_body(id, &snapshot)?;

        let results = evaluate_lookups(document, ops);
        debug!(
            target: "subdoc::lookup",
            doc_id = %id,
            ops = ops.len(),
            failed = results.iter().filter(|r| !r.is_ok()).count(),
            cas = %snapshot.cas,
            "lookup batch evaluated"
        );
        Ok(lookup_outcome(results, snapshot.cas))
    }

    /// Run a mutation batch against `id`, all or nothing
    ///
    /// # Errors
    ///
    /// - `Error::EmptyBatch` / `Error::TooManyOperations` for a bad batch size
    /// - `Error::CasRequired` if the configuration demands a CAS and none is given
    /// - `Error::DocumentNotFound` / `Error::DocumentExists` per the store semantics
    /// - `Error::DocumentNotJson` if the document is binary
    /// - `Error::CasMismatch` if the document changed since `options.cas` or
    ///   since the snapshot was read
    /// - `Error::MultiCommandFailure` if any operation fails; nothing is written
    pub fn mutate_in(
        &self,
        id: &DocId,
        ops: &[MutateOp],
        options: &MutateInOptions,
    ) -> Result<BatchOutcome> {
        validate_batch_size(ops.len(), self.config.max_operations)?;
        if self.config.require_cas && options.cas.is_none() {
            return Err(Error::CasRequired);
        }
        let semantics = options
            .store_semantics
            .unwrap_or(self.config.store_semantics);

        match self.store.read(id)? {
            Some(snapshot) => self.mutate_existing(id, ops, options.cas, semantics, &snapshot),
            None => self.mutate_missing(id, ops, options.cas, semantics),
        }
    }

    /// Run either kind of batch
    ///
    /// `cas` applies to mutation batches only.
    pub fn execute(
        &self,
        id: &DocId,
        batch: &OperationBatch,
        cas: Option<Cas>,
    ) -> Result<BatchOutcome> {
        match batch {
            OperationBatch::Lookup(ops) => self.lookup_in(id, ops),
            OperationBatch::Mutate(ops) => self.mutate_in(
                id,
                ops,
                &MutateInOptions {
                    cas,
                    store_semantics: None,
                },
            ),
        }
    }

    fn mutate_existing(
        &self,
        id: &DocId,
        ops: &[MutateOp],
        expected: Option<Cas>,
        semantics: StoreSemantics,
        snapshot: &StoredDocument,
    ) -> Result<BatchOutcome> {
        if semantics == StoreSemantics::Insert {
            return Err(Error::DocumentExists(id.clone()));
        }
        let document = json_body(id, snapshot)?;
        if let Some(expected) = expected {
            if expected != snapshot.cas {
                warn!(
                    target: "subdoc::mutate",
                    doc_id = %id,
                    expected = %expected,
                    actual = %snapshot.cas,
                    "CAS mismatch before evaluation"
                );
                return Err(Error::CasMismatch {
                    expected,
                    actual: snapshot.cas,
                });
            }
        }

        let output = evaluate_mutations(document, ops).map_err(|e| {
            warn!(
                target: "subdoc::mutate",
                doc_id = %id,
                index = e.index,
                op = %e.op,
                kind = %e.kind,
                "mutation batch rolled back"
            );
            Error::from(e)
        })?;

        let new_cas = self
            .store
            .write_if_match(id, output.document, snapshot.cas)?;
        debug!(
            target: "subdoc::mutate",
            doc_id = %id,
            ops = ops.len(),
            cas = %new_cas,
            "mutation batch applied"
        );
        Ok(mutation_outcome(output.results, Some(snapshot.cas), new_cas))
    }

    fn mutate_missing(
        &self,
        id: &DocId,
        ops: &[MutateOp],
        expected: Option<Cas>,
        semantics: StoreSemantics,
    ) -> Result<BatchOutcome> {
        // A CAS names a version of a document that exists
        if semantics == StoreSemantics::Replace || expected.is_some() {
            return Err(Error::DocumentNotFound(id.clone()));
        }

        let output = evaluate_mutations(&JsonValue::object(), ops).map_err(|e| {
            warn!(
                target: "subdoc::mutate",
                doc_id = %id,
                index = e.index,
                op = %e.op,
                kind = %e.kind,
                "mutation batch rolled back"
            );
            Error::from(e)
        })?;

        let new_cas = match self.store.insert(id, DocumentContent::Json(output.document)) {
            Ok(cas) => cas,
            // Another writer created the document after the snapshot
            Err(Error::DocumentExists(_)) if semantics == StoreSemantics::Upsert => {
                let actual = self
                    .store
                    .read(id)?
                    .map_or(Cas::ABSENT, |current| current.cas);
                warn!(
                    target: "subdoc::mutate",
                    doc_id = %id,
                    actual = %actual,
                    "document created concurrently"
                );
                return Err(Error::CasMismatch {
                    expected: Cas::ABSENT,
                    actual,
                });
            }
            Err(e) => return Err(e),
        };
        debug!(
            target: "subdoc::mutate",
            doc_id = %id,
            ops = ops.len(),
            cas = %new_cas,
            "document created by mutation batch"
        );
        Ok(mutation_outcome(output.results, None, new_cas))
    }
}

fn json_body<'a>(id: &DocId, snapshot: &'a StoredDocument) -> Result<&'a JsonValue> {
    snapshot
        .content
        .as_json()
        .ok_or_else(|| Error::DocumentNotJson(id.clone()))
}
