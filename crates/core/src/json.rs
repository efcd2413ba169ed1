//! JSON value type for sub-document operations
//!
//! [`JsonValue`] is a newtype around `serde_json::Value`. With the
//! `preserve_order` feature of `serde_json`, objects keep insertion order,
//! which sub-document mutations rely on (a removed key does not reorder its
//! siblings, an upserted key lands at the end).
//!
//! Numbers keep their serde_json representation: integers are stored as
//! signed or unsigned 64-bit values and floats as `f64`. Counters only ever
//! operate on the signed 64-bit form.

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Document or operand value
///
/// Reads go through `Deref` to the wrapped `serde_json::Value`; the
/// evaluators work on the inner value directly via [`JsonValue::as_inner_mut`].
///
/// ```
/// use serde_json::json;
/// use subdoc_core::JsonValue;
///
/// let doc = JsonValue::from(json!({"logins": 3}));
/// assert_eq!(doc["logins"].as_i64(), Some(3));
/// assert!(JsonValue::object().is_object());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct JsonValue(serde_json::Value);

impl JsonValue {
    /// An empty object, the body of a document created by a mutation
    pub fn object() -> Self {
        JsonValue(serde_json::Value::Object(serde_json::Map::new()))
    }

    /// Unwrap into the serde_json value
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Borrow the serde_json value
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }

    /// Mutably borrow the serde_json value
    pub fn as_inner_mut(&mut self) -> &mut serde_json::Value {
        &mut self.0
    }

    /// Check whether this value can take part in unique-array comparison
    ///
    /// Only null, booleans, integers and strings qualify.
    pub fn is_unique_comparable(&self) -> bool {
        is_unique_comparable(&self.0)
    }
}

/// Check whether a serde_json value is a null, boolean, integer or string
pub fn is_unique_comparable(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null | serde_json::Value::Bool(_) | serde_json::Value::String(_) => {
            true
        }
        serde_json::Value::Number(n) => !n.is_f64(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
    }
}

impl Deref for JsonValue {
    type Target = serde_json::Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for JsonValue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        JsonValue(v)
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(v: JsonValue) -> Self {
        v.0
    }
}

impl From<bool> for JsonValue {
    fn from(v: bool) -> Self {
        JsonValue(serde_json::Value::Bool(v))
    }
}

impl From<i64> for JsonValue {
    fn from(v: i64) -> Self {
        JsonValue(serde_json::Value::Number(v.into()))
    }
}

// NaN and infinities have no JSON form
impl From<f64> for JsonValue {
    fn from(v: f64) -> Self {
        JsonValue(
            serde_json::Number::from_f64(v)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
        )
    }
}

impl From<&str> for JsonValue {
    fn from(v: &str) -> Self {
        JsonValue(serde_json::Value::String(v.to_string()))
    }
}

impl From<String> for JsonValue {
    fn from(v: String) -> Self {
        JsonValue(serde_json::Value::String(v))
    }
}
