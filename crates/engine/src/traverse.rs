//! Path traversal over `serde_json::Value`
//!
//! Shared by the lookup and mutation evaluators. Traversal failures are
//! reported as [`SubdocErrorKind`]s:
//!
//! - a missing key or an out-of-range index is `PathNotFound`
//! - a field step into a non-object, or an index step into a non-array,
//!   is `PathMismatch`

use serde_json::{Map, Value};
use subdoc_core::{PathComponent, SubdocErrorKind};

type StepResult<T> = std::result::Result<T, SubdocErrorKind>;

/// Follow `components` from `root`
pub(crate) fn resolve<'a>(root: &'a Value, components: &[PathComponent]) -> StepResult<&'a Value> {
    components
        .iter()
        .try_fold(root, |current, component| step(current, component))
}

/// One step of [`resolve`]
pub(crate) fn step<'a>(current: &'a Value, component: &PathComponent) -> StepResult<&'a Value> {
    match (component, current) {
        (PathComponent::Field(name), Value::Object(map)) => {
            map.get(name).ok_or(SubdocErrorKind::PathNotFound)
        }
        (PathComponent::Index(i), Value::Array(items)) => {
            items.get(*i).ok_or(SubdocErrorKind::PathNotFound)
        }
        (PathComponent::LastIndex, Value::Array(items)) => {
            items.last().ok_or(SubdocErrorKind::PathNotFound)
        }
        _ => Err(SubdocErrorKind::PathMismatch),
    }
}

/// Mutable counterpart of [`step`]
///
/// With `create` set, a missing field is filled with an empty object.
pub(crate) fn step_mut<'a>(
    current: &'a mut Value,
    component: &PathComponent,
    create: bool,
) -> StepResult<&'a mut Value> {
    match component {
        PathComponent::Field(name) => match current {
            Value::Object(map) => {
                if create {
                    Ok(map
                        .entry(name.clone())
                        .or_insert_with(|| Value::Object(Map::new())))
                } else {
                    map.get_mut(name).ok_or(SubdocErrorKind::PathNotFound)
                }
            }
            _ => Err(SubdocErrorKind::PathMismatch),
        },
        PathComponent::Index(i) => match current {
            Value::Array(items) => items.get_mut(*i).ok_or(SubdocErrorKind::PathNotFound),
            _ => Err(SubdocErrorKind::PathMismatch),
        },
        PathComponent::LastIndex => match current {
            Value::Array(items) => items.last_mut().ok_or(SubdocErrorKind::PathNotFound),
            _ => Err(SubdocErrorKind::PathMismatch),
        },
    }
}

/// Walk to the container that holds `leaf`
///
/// `parents` are the components before `leaf`. With `create_parents`, a
/// missing intermediate is created as an empty object, but only when the
/// component after it is a field; an index cannot address a new object.
pub(crate) fn parent_mut<'a>(
    root: &'a mut Value,
    parents: &[PathComponent],
    leaf: &PathComponent,
    create_parents: bool,
) -> StepResult<&'a mut Value> {
    let mut current = root;
    for (i, component) in parents.iter().enumerate() {
        let next = parents.get(i + 1).unwrap_or(leaf);
        current = step_mut(current, component, create_parents && next.is_field())?;
    }
    Ok(current)
}

/// Resolve the array addressed by `components`
///
/// With `create_parents`, a missing final field is created as an empty
/// array, and missing intermediates as empty objects.
pub(crate) fn array_mut<'a>(
    root: &'a mut Value,
    components: &[PathComponent],
    create_parents: bool,
) -> StepResult<&'a mut Vec<Value>> {
    let target = match components.split_last() {
        None => root,
        Some((leaf, parents)) => {
            let parent = parent_mut(root, parents, leaf, create_parents)?;
            match leaf {
                PathComponent::Field(name) if create_parents => match parent {
                    Value::Object(map) => map
                        .entry(name.clone())
                        .or_insert_with(|| Value::Array(Vec::new())),
                    _ => return Err(SubdocErrorKind::PathMismatch),
                },
                _ => step_mut(parent, leaf, false)?,
            }
        }
    };
    match target {
        Value::Array(items) => Ok(items),
        _ => Err(SubdocErrorKind::PathMismatch),
    }
}
