//! Mutation evaluation
//!
//! A batch is applied in order to a private copy of the document.
//! Operation `i + 1` sees the effects of operation `i`. The first failure
//! abandons the copy and reports a [`BatchError`]; the caller's document
//! is borrowed immutably and so is untouched either way.
//!
//! # Command rules
//!
//! | Command | Final component | Notes |
//! |---------|-----------------|-------|
//! | Upsert / Insert | field | Insert fails with `PathExists` if present |
//! | Replace | any, or root | leaf must exist |
//! | Remove | any, not root | leaf must exist |
//! | ArrayAppend / ArrayPrepend | any, or root | target must be an array |
//! | ArrayInsert | `[n]` | `n` in `0..=len` |
//! | ArrayAddUnique | any, or root | scalars only, `PathExists` if present |
//! | Counter | field or index | missing field starts at 0 |

use crate::traverse::{array_mut, parent_mut, step_mut};
use serde_json::Value;
use subdoc_core::{
    JsonValue, MutateAction, MutateKind, MutateOp, OperationResult, PathComponent,
    SubdocErrorKind, SubdocPath,
};
use thiserror::Error;
use tracing::debug;

type OpResult<T> = std::result::Result<T, SubdocErrorKind>;

/// The first failing operation of a rolled-back batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation {index} ({op}) failed with {kind}")]
pub struct BatchError {
    /// Position of the operation in the batch
    pub index: usize,
    /// Command of the failing operation
    pub op: MutateKind,
    /// Why it failed
    pub kind: SubdocErrorKind,
}

/// Evaluated document and per-operation results of a successful batch
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutput {
    /// The document after every operation
    pub document: JsonValue,
    /// One result per operation; counters carry their new value
    pub results: Vec<OperationResult>,
}

/// Apply `ops` in order to a copy of `document`
///
/// # Errors
///
/// Returns the index and kind of the first operation that fails. No
/// partial document is returned in that case.
pub fn evaluate_mutations(
    document: &JsonValue,
    ops: &[MutateOp],
) -> Result<MutationOutput, BatchError> {
    let mut working = document.clone();
    let mut results = Vec::with_capacity(ops.len());

    for (index, op) in ops.iter().enumerate() {
        match apply(working.as_inner_mut(), op) {
            Ok(value) => results.push(OperationResult::ok(index, value)),
            Err(kind) => {
                debug!(
                    target: "subdoc::mutate",
                    index,
                    op = %op.kind(),
                    path = %op.path,
                    kind = %kind,
                    "operation failed, discarding working copy"
                );
                return Err(BatchError {
                    index,
                    op: op.kind(),
                    kind,
                });
            }
        }
    }

    Ok(MutationOutput {
        document: working,
        results,
    })
}

/// Apply one operation, returning its result payload
fn apply(document: &mut Value, op: &MutateOp) -> OpResult<Option<JsonValue>> {
    let path = op.parse_path().map_err(|e| e.kind())?;
    let create = op.create_parents;

    let value = match &op.action {
        MutateAction::Upsert(value) => set_field(document, &path, value, create, true)?,
        MutateAction::Insert(value) => set_field(document, &path, value, create, false)?,
        MutateAction::Replace(value) => replace(document, &path, value)?,
        MutateAction::Remove => remove(document, &path)?,
        MutateAction::ArrayAppend(values) => {
            let values = operand_list(values)?;
            array_mut(document, path.components(), create)?.extend(values);
            None
        }
        MutateAction::ArrayPrepend(values) => {
            let values = operand_list(values)?;
            insert_all(array_mut(document, path.components(), create)?, 0, values);
            None
        }
        MutateAction::ArrayInsert(values) => array_insert(document, &path, values)?,
        MutateAction::ArrayAddUnique(value) => add_unique(document, &path, value, create)?,
        MutateAction::Counter(delta) => counter(document, &path, *delta, create)?,
    };
    Ok(value.map(JsonValue::from))
}

/// Array operands, one element per value
fn operand_list(values: &[JsonValue]) -> OpResult<Vec<Value>> {
    if values.is_empty() {
        return Err(SubdocErrorKind::CannotInsert);
    }
    Ok(values.iter().map(|v| v.as_inner().clone()).collect())
}

/// Insert `values` before `position`, keeping their listed order
fn insert_all(items: &mut Vec<Value>, position: usize, values: Vec<Value>) {
    let tail = items.split_off(position);
    items.extend(values);
    items.extend(tail);
}

/// Upsert (`overwrite`) or Insert into the object holding the final field
fn set_field(
    document: &mut Value,
    path: &SubdocPath,
    value: &JsonValue,
    create: bool,
    overwrite: bool,
) -> OpResult<Option<Value>> {
    let (leaf, parents) = path.split_last().ok_or(SubdocErrorKind::InvalidPath)?;
    let PathComponent::Field(name) = leaf else {
        return Err(SubdocErrorKind::InvalidPath);
    };
    let Value::Object(map) = parent_mut(document, parents, leaf, create)? else {
        return Err(SubdocErrorKind::PathMismatch);
    };
    if !overwrite && map.contains_key(name) {
        return Err(SubdocErrorKind::PathExists);
    }
    map.insert(name.clone(), value.as_inner().clone());
    Ok(None)
}

fn replace(document: &mut Value, path: &SubdocPath, value: &JsonValue) -> OpResult<Option<Value>> {
    let target = match path.split_last() {
        None => document,
        Some((leaf, parents)) => {
            let parent = parent_mut(document, parents, leaf, false)?;
            step_mut(parent, leaf, false)?
        }
    };
    *target = value.as_inner().clone();
    Ok(None)
}

fn remove(document: &mut Value, path: &SubdocPath) -> OpResult<Option<Value>> {
    let (leaf, parents) = path.split_last().ok_or(SubdocErrorKind::InvalidPath)?;
    let parent = parent_mut(document, parents, leaf, false)?;
    let removed = match (leaf, parent) {
        // shift_remove keeps the remaining keys in insertion order
        (PathComponent::Field(name), Value::Object(map)) => map.shift_remove(name).is_some(),
        (PathComponent::Index(i), Value::Array(items)) => {
            if *i < items.len() {
                items.remove(*i);
                true
            } else {
                false
            }
        }
        (PathComponent::LastIndex, Value::Array(items)) => items.pop().is_some(),
        _ => return Err(SubdocErrorKind::PathMismatch),
    };
    if removed {
        Ok(None)
    } else {
        Err(SubdocErrorKind::PathNotFound)
    }
}

fn array_insert(
    document: &mut Value,
    path: &SubdocPath,
    values: &[JsonValue],
) -> OpResult<Option<Value>> {
    let (leaf, parents) = path.split_last().ok_or(SubdocErrorKind::InvalidPath)?;
    let PathComponent::Index(position) = *leaf else {
        return Err(SubdocErrorKind::InvalidPath);
    };
    let values = operand_list(values)?;
    let Value::Array(items) = parent_mut(document, parents, leaf, false)? else {
        return Err(SubdocErrorKind::PathMismatch);
    };
    if position > items.len() {
        return Err(SubdocErrorKind::PathNotFound);
    }
    insert_all(items, position, values);
    Ok(None)
}

fn add_unique(
    document: &mut Value,
    path: &SubdocPath,
    value: &JsonValue,
    create: bool,
) -> OpResult<Option<Value>> {
    if !value.is_unique_comparable() {
        return Err(SubdocErrorKind::CannotInsert);
    }
    let items = array_mut(document, path.components(), create)?;
    if !items.iter().all(subdoc_core::json::is_unique_comparable) {
        return Err(SubdocErrorKind::PathMismatch);
    }
    if items.contains(value.as_inner()) {
        return Err(SubdocErrorKind::PathExists);
    }
    items.push(value.as_inner().clone());
    Ok(None)
}

fn counter(
    document: &mut Value,
    path: &SubdocPath,
    delta: i64,
    create: bool,
) -> OpResult<Option<Value>> {
    // -(2^63) is outside the symmetric counter range
    if delta == i64::MIN {
        return Err(SubdocErrorKind::RangeError);
    }
    let (leaf, parents) = path.split_last().ok_or(SubdocErrorKind::InvalidPath)?;
    let parent = parent_mut(document, parents, leaf, create)?;
    let slot = match leaf {
        PathComponent::Field(name) => match parent {
            Value::Object(map) => map.entry(name.clone()).or_insert_with(|| Value::from(0)),
            _ => return Err(SubdocErrorKind::PathMismatch),
        },
        _ => step_mut(parent, leaf, false)?,
    };

    let current = match slot {
        Value::Number(n) if n.is_i64() => n.as_i64().ok_or(SubdocErrorKind::PathMismatch)?,
        Value::Number(n) if n.is_u64() => return Err(SubdocErrorKind::RangeError),
        _ => return Err(SubdocErrorKind::PathMismatch),
    };
    let updated = current
        .checked_add(delta)
        .filter(|v| *v != i64::MIN)
        .ok_or(SubdocErrorKind::RangeError)?;
    *slot = Value::from(updated);
    Ok(Some(Value::from(updated)))
}
