//! Error types for sub-document operations
//!
//! Two layers are defined here:
//! - [`SubdocErrorKind`]: the closed taxonomy reported per operation
//! - [`Error`]: the top-level error returned by batch execution
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::{Cas, DocId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for batch execution
pub type Result<T> = std::result::Result<T, Error>;

/// Closed set of sub-document error kinds
///
/// Lookup batches record one of these in the failing operation's result
/// slot. Mutation batches escalate the first one to
/// [`Error::MultiCommandFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubdocErrorKind {
    /// The path (or, for dictionary mutations, its immediate parent) does not exist
    PathNotFound,
    /// The path already exists, or the value is already present in a unique array
    PathExists,
    /// The path exists but the document structure conflicts with it
    PathMismatch,
    /// The path text is longer than the allowed number of characters
    PathTooLong,
    /// The path has more components than allowed
    PathTooDeep,
    /// The path is syntactically invalid or unsuitable for the command
    InvalidPath,
    /// The document is not JSON
    DocumentNotJson,
    /// The value cannot be inserted by this command
    CannotInsert,
    /// A counter would leave the signed 64-bit range
    RangeError,
    /// The document's CAS changed since the caller read it
    CasMismatch,
    /// A mutation batch failed; see the wrapped operation
    MultiCommandFailure,
    /// The batch exceeds the operation limit
    TooManyOperations,
}

impl SubdocErrorKind {
    /// Stable name of the kind
    pub const fn as_str(&self) -> &'static str {
        match self {
            SubdocErrorKind::PathNotFound => "PathNotFound",
            SubdocErrorKind::PathExists => "PathExists",
            SubdocErrorKind::PathMismatch => "PathMismatch",
            SubdocErrorKind::PathTooLong => "PathTooLong",
            SubdocErrorKind::PathTooDeep => "PathTooDeep",
            SubdocErrorKind::InvalidPath => "InvalidPath",
            SubdocErrorKind::DocumentNotJson => "DocumentNotJson",
            SubdocErrorKind::CannotInsert => "CannotInsert",
            SubdocErrorKind::RangeError => "RangeError",
            SubdocErrorKind::CasMismatch => "CasMismatch",
            SubdocErrorKind::MultiCommandFailure => "MultiCommandFailure",
            SubdocErrorKind::TooManyOperations => "TooManyOperations",
        }
    }
}

impl fmt::Display for SubdocErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error for lookup and mutation batches
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A mutation batch was rolled back
    ///
    /// Carries the position and kind of the first operation that failed.
    /// The stored document was not written.
    #[error("multi-command failure: operation {index} failed with {kind}")]
    MultiCommandFailure {
        /// Position of the failing operation in the batch
        index: usize,
        /// Why it failed
        kind: SubdocErrorKind,
    },

    /// The document changed since the caller's snapshot
    #[error("CAS mismatch: expected {expected}, found {actual}")]
    CasMismatch {
        /// CAS the caller expected
        expected: Cas,
        /// CAS currently stored
        actual: Cas,
    },

    /// The batch carries more operations than allowed
    #[error("too many operations: {count} exceeds maximum of {max}")]
    TooManyOperations {
        /// Operations in the batch
        count: usize,
        /// Maximum allowed
        max: usize,
    },

    /// The batch carries no operations
    #[error("operation batch is empty")]
    EmptyBatch,

    /// No document is stored under the id
    #[error("document not found: {0}")]
    DocumentNotFound(DocId),

    /// A document is already stored under the id
    #[error("document already exists: {0}")]
    DocumentExists(DocId),

    /// The stored document is binary, not JSON
    #[error("document is not JSON: {0}")]
    DocumentNotJson(DocId),

    /// The collection requires a CAS for every mutation batch
    #[error("a CAS value is required for mutations")]
    CasRequired,

    /// Configuration could not be loaded or is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The document store failed
    #[error("storage error: {0}")]
    Storage(String),

    /// An I/O or serialization step outside the document store failed
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error onto the sub-document taxonomy, where it has a counterpart
    pub fn kind(&self) -> Option<SubdocErrorKind> {
        match self {
            Error::MultiCommandFailure { .. } => Some(SubdocErrorKind::MultiCommandFailure),
            Error::CasMismatch { .. } => Some(SubdocErrorKind::CasMismatch),
            Error::TooManyOperations { .. } => Some(SubdocErrorKind::TooManyOperations),
            Error::DocumentNotJson(_) => Some(SubdocErrorKind::DocumentNotJson),
            Error::EmptyBatch
            | Error::DocumentNotFound(_)
            | Error::DocumentExists(_)
            | Error::CasRequired
            | Error::InvalidConfig(_)
            | Error::Storage(_)
            | Error::Internal(_) => None,
        }
    }

    /// Check whether this error signals a concurrent modification
    pub fn is_cas_mismatch(&self) -> bool {
        matches!(self, Error::CasMismatch { .. })
    }
}
