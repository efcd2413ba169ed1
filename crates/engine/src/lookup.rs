//! Lookup evaluation
//!
//! Every operation runs against the same borrowed snapshot, so lookups can
//! never observe one another. A failing operation records its error kind
//! in its own result slot and its siblings carry on.

use crate::traverse::resolve;
use serde_json::Value;
use subdoc_core::{
    JsonValue, LookupKind, LookupOp, OperationResult, SubdocErrorKind,
};

/// Evaluate `ops` against `document`
///
/// Results are in input order, one per operation. `Exists` reports a
/// missing path as `false`; a type conflict along the path is still
/// `PathMismatch`.
pub fn evaluate_lookups(document: &JsonValue, ops: &[LookupOp]) -> Vec<OperationResult> {
    ops.iter()
        .enumerate()
        .map(|(index, op)| match evaluate_one(document.as_inner(), op) {
            Ok(value) => OperationResult::ok(index, Some(value)),
            Err(kind) => OperationResult::failed(index, kind),
        })
        .collect()
}

fn evaluate_one(document: &Value, op: &LookupOp) -> Result<JsonValue, SubdocErrorKind> {
    let path = op.parse_path().map_err(|e| e.kind())?;
    let found = resolve(document, path.components());
    match op.kind {
        LookupKind::Get => found.map(|value| JsonValue::from(value.clone())),
        LookupKind::Exists => match found {
            Ok(_) => Ok(JsonValue::from(true)),
            Err(SubdocErrorKind::PathNotFound) => Ok(JsonValue::from(false)),
            Err(kind) => Err(kind),
        },
    }
}
