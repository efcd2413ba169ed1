//! Document storage for the sub-document engine
//!
//! This crate implements the store side of the CAS contract:
//! - DocumentStore: read / write-if-match / insert / upsert / remove
//! - InMemoryStore: DashMap-backed store with a monotonic CAS generator
//! - StoredDocument: content plus the CAS it was written under
//!
//! The engine never holds a lock across a batch. It reads a snapshot,
//! evaluates against a private copy, and swaps the result back with
//! [`DocumentStore::write_if_match`], which fails with
//! `Error::CasMismatch` if anyone wrote in between.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod sharded;
pub mod store;

pub use document::{DocumentContent, StoredDocument};
pub use sharded::InMemoryStore;
pub use store::DocumentStore;
