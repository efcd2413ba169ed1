//! Sub-document engine
//!
//! This crate evaluates path-addressed operations against JSON documents:
//! - Lookup evaluation: independent `Get` / `Exists` per operation
//! - Mutation evaluation: ordered, all-or-nothing on a working copy
//! - Outcome assembly: `MultiCommandFailure` for rolled-back batches
//! - Collection: snapshot read plus CAS-guarded write-back
//! - Configuration via `subdoc.toml`
//!
//! The evaluators are pure functions over borrowed documents. Only
//! [`Collection`] talks to a [`DocumentStore`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assemble;
pub mod collection;
pub mod config;
pub mod lookup;
pub mod mutate;
mod traverse;

pub use collection::{Collection, MutateInOptions};
pub use config::{StoreSemantics, SubdocConfig, CONFIG_FILE_NAME};
pub use lookup::evaluate_lookups;
pub use mutate::{evaluate_mutations, BatchError, MutationOutput};

pub use subdoc_core::{
    BatchOutcome, Cas, DecodeError, DocId, Error, JsonValue, LookupKind, LookupOp,
    MutateAction, MutateKind, MutateOp, OpStatus, OperationBatch, OperationResult,
    PathComponent, PathError, Result, SubdocErrorKind, SubdocPath, MAX_OPERATIONS,
    MAX_PATH_DEPTH, MAX_PATH_LENGTH,
};
pub use subdoc_storage::{DocumentContent, DocumentStore, InMemoryStore, StoredDocument};
