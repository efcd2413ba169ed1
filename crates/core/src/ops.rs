//! Sub-document operation descriptors
//!
//! Operations carry their path as text, exactly as a caller wrote it. The
//! evaluator parses each path when it runs the operation, so a malformed
//! path fails that operation (`InvalidPath`, `PathTooLong`, `PathTooDeep`)
//! instead of the whole request.
//!
//! - [`LookupOp`]: `Get` / `Exists`
//! - [`MutateOp`]: `Upsert`, `Insert`, `Replace`, `Remove`, the array
//!   commands and `Counter`
//! - [`OperationBatch`]: 1..=[`MAX_OPERATIONS`] operations of one class
//!
//! # Examples
//!
//! ```
//! use subdoc_core::ops::{LookupOp, MutateOp};
//!
//! let lookups = vec![
//!     LookupOp::get("addresses.delivery.country"),
//!     LookupOp::exists("purchases.pending[-1]"),
//! ];
//!
//! let mutations = vec![
//!     MutateOp::remove("addresses.billing"),
//!     MutateOp::replace("email", "dougr96@hotmail.com"),
//!     MutateOp::array_append("some.array", ["Hello", "World"]).create_parents(true),
//! ];
//! # let _ = (lookups, mutations);
//! ```

use crate::error::{Error, Result};
use crate::json::JsonValue;
use crate::path::{PathError, SubdocPath};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of operations in one batch
pub const MAX_OPERATIONS: usize = 16;

/// Kind of a lookup operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupKind {
    /// Return the value at the path
    Get,
    /// Report whether the path exists
    Exists,
}

/// A read-only operation on one path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupOp {
    /// What to do at the path
    pub kind: LookupKind,
    /// Path text
    pub path: String,
}

impl LookupOp {
    /// Fetch the value at `path`
    pub fn get(path: impl Into<String>) -> Self {
        LookupOp {
            kind: LookupKind::Get,
            path: path.into(),
        }
    }

    /// Check whether `path` exists
    pub fn exists(path: impl Into<String>) -> Self {
        LookupOp {
            kind: LookupKind::Exists,
            path: path.into(),
        }
    }

    /// Parse this operation's path
    pub fn parse_path(&self) -> std::result::Result<SubdocPath, PathError> {
        self.path.parse()
    }
}

/// Kind of a mutation operation, without its operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutateKind {
    /// Set a field, creating it if absent
    Upsert,
    /// Create a field that must not exist yet
    Insert,
    /// Overwrite an existing value
    Replace,
    /// Delete an existing value
    Remove,
    /// Add elements to the end of an array
    ArrayAppend,
    /// Add elements to the front of an array
    ArrayPrepend,
    /// Add elements at a position inside an array
    ArrayInsert,
    /// Add a scalar to an array unless already present
    ArrayAddUnique,
    /// Add a signed delta to an integer
    Counter,
}

impl MutateKind {
    /// Stable name of the kind
    pub const fn as_str(&self) -> &'static str {
        match self {
            MutateKind::Upsert => "upsert",
            MutateKind::Insert => "insert",
            MutateKind::Replace => "replace",
            MutateKind::Remove => "remove",
            MutateKind::ArrayAppend => "array_append",
            MutateKind::ArrayPrepend => "array_prepend",
            MutateKind::ArrayInsert => "array_insert",
            MutateKind::ArrayAddUnique => "array_add_unique",
            MutateKind::Counter => "counter",
        }
    }
}

impl fmt::Display for MutateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mutation command together with its operand
///
/// Array commands take a list of values; each listed value becomes its own
/// array element. To add one nested array, pass a single array value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MutateAction {
    /// Set a field, creating it if absent
    Upsert(JsonValue),
    /// Create a field that must not exist yet
    Insert(JsonValue),
    /// Overwrite an existing value
    Replace(JsonValue),
    /// Delete an existing value
    Remove,
    /// Add elements to the end of an array, in listed order
    ArrayAppend(Vec<JsonValue>),
    /// Add elements to the front of an array, in listed order
    ArrayPrepend(Vec<JsonValue>),
    /// Add elements at the position named by the path's final index
    ArrayInsert(Vec<JsonValue>),
    /// Add a scalar to an array unless already present
    ArrayAddUnique(JsonValue),
    /// Add a signed delta to an integer
    Counter(i64),
}

impl MutateAction {
    /// Kind of this action
    pub fn kind(&self) -> MutateKind {
        match self {
            MutateAction::Upsert(_) => MutateKind::Upsert,
            MutateAction::Insert(_) => MutateKind::Insert,
            MutateAction::Replace(_) => MutateKind::Replace,
            MutateAction::Remove => MutateKind::Remove,
            MutateAction::ArrayAppend(_) => MutateKind::ArrayAppend,
            MutateAction::ArrayPrepend(_) => MutateKind::ArrayPrepend,
            MutateAction::ArrayInsert(_) => MutateKind::ArrayInsert,
            MutateAction::ArrayAddUnique(_) => MutateKind::ArrayAddUnique,
            MutateAction::Counter(_) => MutateKind::Counter,
        }
    }
}

/// A mutation of one path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutateOp {
    /// Command and operand
    pub action: MutateAction,
    /// Path text
    pub path: String,
    /// Create missing intermediate objects along the path
    #[serde(default)]
    pub create_parents: bool,
}

fn values<I, V>(values: I) -> Vec<JsonValue>
where
    I: IntoIterator<Item = V>,
    V: Into<JsonValue>,
{
    values.into_iter().map(Into::into).collect()
}

impl MutateOp {
    /// Build an operation from an action
    pub fn new(path: impl Into<String>, action: MutateAction) -> Self {
        MutateOp {
            action,
            path: path.into(),
            create_parents: false,
        }
    }

    /// Set `path` to `value`, creating the field if absent
    pub fn upsert(path: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::new(path, MutateAction::Upsert(value.into()))
    }

    /// Create `path` with `value`; fails if it exists
    pub fn insert(path: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::new(path, MutateAction::Insert(value.into()))
    }

    /// Overwrite the existing value at `path`
    pub fn replace(path: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::new(path, MutateAction::Replace(value.into()))
    }

    /// Delete the value at `path`
    pub fn remove(path: impl Into<String>) -> Self {
        Self::new(path, MutateAction::Remove)
    }

    /// Append each value to the array at `path`
    pub fn array_append<I, V>(path: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        Self::new(path, MutateAction::ArrayAppend(values(items)))
    }

    /// Prepend the values, in listed order, to the array at `path`
    pub fn array_prepend<I, V>(path: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        Self::new(path, MutateAction::ArrayPrepend(values(items)))
    }

    /// Insert the values at the index that ends `path`
    pub fn array_insert<I, V>(path: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        Self::new(path, MutateAction::ArrayInsert(values(items)))
    }

    /// Add `value` to the array at `path` unless already present
    pub fn array_add_unique(path: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::new(path, MutateAction::ArrayAddUnique(value.into()))
    }

    /// Add `delta` to the integer at `path`
    pub fn counter(path: impl Into<String>, delta: i64) -> Self {
        Self::new(path, MutateAction::Counter(delta))
    }

    /// Set the create-parents flag (builder pattern)
    pub fn create_parents(mut self, create_parents: bool) -> Self {
        self.create_parents = create_parents;
        self
    }

    /// Kind of this operation
    pub fn kind(&self) -> MutateKind {
        self.action.kind()
    }

    /// Parse this operation's path
    pub fn parse_path(&self) -> std::result::Result<SubdocPath, PathError> {
        self.path.parse()
    }
}

/// Operations sent together against one document
///
/// A batch is either all lookups or all mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationBatch {
    /// Independent read operations on one snapshot
    Lookup(Vec<LookupOp>),
    /// All-or-nothing mutations
    Mutate(Vec<MutateOp>),
}

impl OperationBatch {
    /// Number of operations in the batch
    pub fn len(&self) -> usize {
        match self {
            OperationBatch::Lookup(ops) => ops.len(),
            OperationBatch::Mutate(ops) => ops.len(),
        }
    }

    /// Check whether the batch has no operations
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Check that a batch of `count` operations fits within `1..=max`
pub fn validate_batch_size(count: usize, max: usize) -> Result<()> {
    if count == 0 {
        return Err(Error::EmptyBatch);
    }
    if count > max {
        return Err(Error::TooManyOperations { count, max });
    }
    Ok(())
}
