//! Stored document representation

use serde::{Deserialize, Serialize};
use subdoc_core::{Cas, JsonValue};

/// Body of a stored document
///
/// Sub-document commands only understand JSON. Binary bodies are kept so
/// that commands against them can report `DocumentNotJson`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentContent {
    /// A JSON document
    Json(JsonValue),
    /// Opaque bytes
    Binary(Vec<u8>),
}

impl DocumentContent {
    /// The JSON body, if this is a JSON document
    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            DocumentContent::Json(value) => Some(value),
            DocumentContent::Binary(_) => None,
        }
    }

    /// Check whether this is a JSON document
    pub fn is_json(&self) -> bool {
        matches!(self, DocumentContent::Json(_))
    }
}

impl From<JsonValue> for DocumentContent {
    fn from(value: JsonValue) -> Self {
        DocumentContent::Json(value)
    }
}

impl From<Vec<u8>> for DocumentContent {
    fn from(bytes: Vec<u8>) -> Self {
        DocumentContent::Binary(bytes)
    }
}

/// A document as read from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Document body
    pub content: DocumentContent,
    /// CAS assigned by the write that produced this body
    pub cas: Cas,
}

impl StoredDocument {
    /// Create a stored document
    pub fn new(content: impl Into<DocumentContent>, cas: Cas) -> Self {
        StoredDocument {
            content: content.into(),
            cas,
        }
    }
}
