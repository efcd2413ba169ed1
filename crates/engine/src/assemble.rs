//! Outcome assembly
//!
//! Lookup failures stay in their result slots. A failed mutation batch is
//! reported once, as `MultiCommandFailure` wrapping the first failing
//! operation's index and kind.

use crate::mutate::BatchError;
use subdoc_core::{BatchOutcome, Cas, Error, OperationResult};

impl From<BatchError> for Error {
    fn from(err: BatchError) -> Self {
        Error::MultiCommandFailure {
            index: err.index,
            kind: err.kind,
        }
    }
}

/// Outcome of a lookup batch read at `cas`
pub fn lookup_outcome(results: Vec<OperationResult>, cas: Cas) -> BatchOutcome {
    BatchOutcome::lookup(results, Some(cas))
}

/// Outcome of a mutation batch written back under `new_cas`
///
/// `snapshot_cas` is None when the batch created the document.
pub fn mutation_outcome(
    results: Vec<OperationResult>,
    snapshot_cas: Option<Cas>,
    new_cas: Cas,
) -> BatchOutcome {
    debug_assert!(results.iter().all(OperationResult::is_ok));
    BatchOutcome::mutated(results, snapshot_cas, new_cas)
}
