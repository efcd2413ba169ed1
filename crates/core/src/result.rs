//! Per-operation results and batch outcomes
//!
//! Results hold untyped [`JsonValue`]s. Callers project them onto their own
//! types with `content_as`, which decodes through serde and reports a
//! [`DecodeError`] instead of panicking on a type mismatch.
//!
//! ```
//! use subdoc_core::result::OperationResult;
//! use subdoc_core::JsonValue;
//!
//! let result = OperationResult::ok(0, Some(JsonValue::from("United Kingdom")));
//! let country: String = result.content_as().unwrap();
//! assert_eq!(country, "United Kingdom");
//! assert!(result.content_as::<bool>().is_err());
//! ```

use crate::error::SubdocErrorKind;
use crate::json::JsonValue;
use crate::types::Cas;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error projecting a result onto a caller type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// No operation at this position
    #[error("no result at index {0}")]
    IndexOutOfRange(usize),
    /// The operation failed, so it has no content
    #[error("operation {index} failed with {kind}")]
    OperationFailed {
        /// Position of the operation
        index: usize,
        /// Why it failed
        kind: SubdocErrorKind,
    },
    /// The operation succeeded without returning content
    #[error("operation {0} returned no value")]
    NoValue(usize),
    /// The value does not fit the requested type
    #[error("cannot decode value of operation {index}: {message}")]
    Type {
        /// Position of the operation
        index: usize,
        /// serde's explanation
        message: String,
    },
}

/// Status of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpStatus {
    /// The operation succeeded
    Ok,
    /// The operation failed
    Failed(SubdocErrorKind),
}

/// Outcome of one operation in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Position of the operation in its batch
    pub index: usize,
    /// Success or the error kind
    pub status: OpStatus,
    /// Lookup content, or the updated value of a counter
    pub value: Option<JsonValue>,
}

impl OperationResult {
    /// A successful result
    pub fn ok(index: usize, value: Option<JsonValue>) -> Self {
        OperationResult {
            index,
            status: OpStatus::Ok,
            value,
        }
    }

    /// A failed result
    pub fn failed(index: usize, kind: SubdocErrorKind) -> Self {
        OperationResult {
            index,
            status: OpStatus::Failed(kind),
            value: None,
        }
    }

    /// Check whether the operation succeeded
    pub fn is_ok(&self) -> bool {
        self.status == OpStatus::Ok
    }

    /// The error kind, if the operation failed
    pub fn error(&self) -> Option<SubdocErrorKind> {
        match self.status {
            OpStatus::Ok => None,
            OpStatus::Failed(kind) => Some(kind),
        }
    }

    /// Decode the content as `T`
    pub fn content_as<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        if let OpStatus::Failed(kind) = self.status {
            return Err(DecodeError::OperationFailed {
                index: self.index,
                kind,
            });
        }
        let value = self.value.as_ref().ok_or(DecodeError::NoValue(self.index))?;
        serde_json::from_value(value.as_inner().clone()).map_err(|e| DecodeError::Type {
            index: self.index,
            message: e.to_string(),
        })
    }
}

/// Outcome of a whole batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// One result per operation, in batch order
    pub results: Vec<OperationResult>,
    /// Whether the stored document was replaced
    pub document_mutated: bool,
    /// CAS assigned by the write, for mutation batches
    pub new_cas: Option<Cas>,
    /// CAS of the snapshot the batch was evaluated against
    pub cas: Option<Cas>,
}

impl BatchOutcome {
    /// Outcome of a read-only batch
    pub fn lookup(results: Vec<OperationResult>, cas: Option<Cas>) -> Self {
        BatchOutcome {
            results,
            document_mutated: false,
            new_cas: None,
            cas,
        }
    }

    /// Outcome of a mutation batch that was written back
    pub fn mutated(results: Vec<OperationResult>, cas: Option<Cas>, new_cas: Cas) -> Self {
        BatchOutcome {
            results,
            document_mutated: true,
            new_cas: Some(new_cas),
            cas,
        }
    }

    /// Number of results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check whether there are no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result of the operation at `index`
    pub fn result(&self, index: usize) -> Option<&OperationResult> {
        self.results.get(index)
    }

    /// Decode the content of the operation at `index` as `T`
    pub fn content_as<T: DeserializeOwned>(&self, index: usize) -> Result<T, DecodeError> {
        self.result(index)
            .ok_or(DecodeError::IndexOutOfRange(index))?
            .content_as()
    }

    /// Check whether every operation succeeded
    pub fn all_ok(&self) -> bool {
        self.results.iter().all(OperationResult::is_ok)
    }
}
