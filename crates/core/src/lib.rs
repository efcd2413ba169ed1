//! Core types for the sub-document engine
//!
//! This crate defines the foundational types used throughout the system:
//! - JsonValue: Document values (serde_json, insertion-ordered objects)
//! - SubdocPath / PathComponent: Parsed sub-document paths
//! - LookupOp / MutateOp / OperationBatch: Operation descriptors
//! - OperationResult / BatchOutcome: Per-operation and per-batch results
//! - SubdocErrorKind / Error: Error taxonomy
//! - DocId / Cas: Document identity and compare-and-swap tokens

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod json;
pub mod ops;
pub mod path;
pub mod result;
pub mod types;

pub use error::{Error, Result, SubdocErrorKind};
pub use json::JsonValue;
pub use ops::{
    validate_batch_size, LookupKind, LookupOp, MutateAction, MutateKind, MutateOp,
    OperationBatch, MAX_OPERATIONS,
};
pub use path::{PathComponent, PathError, SubdocPath, MAX_PATH_DEPTH, MAX_PATH_LENGTH};
pub use result::{BatchOutcome, DecodeError, OpStatus, OperationResult};
pub use types::{Cas, DocId};
