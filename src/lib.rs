//! Subdoc - path-addressed lookups and mutations over JSON documents
//!
//! A batch of up to 16 operations addresses paths inside one stored
//! document. Lookups succeed or fail one by one; mutations succeed
//! together or not at all, and are written back under the CAS of the
//! snapshot they were evaluated against.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use subdoc::{Collection, DocId, DocumentContent, DocumentStore, InMemoryStore, JsonValue,
//!     LookupOp, MutateInOptions, MutateOp};
//!
//! let store = Arc::new(InMemoryStore::new());
//! let id = DocId::new("customer123");
//! store
//!     .upsert(&id, DocumentContent::Json(JsonValue::from(json!({"purchases": {"complete": [339]}}))))
//!     .unwrap();
//!
//! let collection = Collection::new(store);
//! collection
//!     .mutate_in(
//!         &id,
//!         &[MutateOp::array_append("purchases.complete", [777i64])],
//!         &MutateInOptions::default(),
//!     )
//!     .unwrap();
//!
//! let outcome = collection
//!     .lookup_in(&id, &[LookupOp::get("purchases.complete[-1]")])
//!     .unwrap();
//! assert_eq!(outcome.content_as::<i64>(0).unwrap(), 777);
//! ```
//!
//! # Architecture
//!
//! - `subdoc-core`: values, paths, operations, results, errors
//! - `subdoc-storage`: the document store contract and an in-memory store
//! - `subdoc-engine`: evaluators and the [`Collection`] executor
//!
//! Everything public is re-exported from the engine.

pub use subdoc_engine::*;
