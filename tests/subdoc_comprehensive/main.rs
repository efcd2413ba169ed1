//! Subdoc Comprehensive Test Suite
//!
//! Tests for the sub-document semantic guarantees.
//!
//! ## Test Tier Structure
//!
//! - **Tier 1: Semantic Invariants** (sacred, must never break)
//!   Mutation batches are all-or-nothing, lookups are independent and pure.
//!
//! - **Tier 2: Scenarios** (documented behaviour)
//!   The customer-document walkthroughs, command by command.
//!
//! - **Tier 3: Path Syntax** (grammar and limits)
//!   Escapes, backticks, `[-1]`, length and depth limits.
//!
//! - **Tier 4: Counters** (signed 64-bit range)
//!
//! - **Tier 5: CAS & Concurrency** (optimistic write-back)
//!   Stale CAS, racing writers, store semantics.
//!
//! - **Tier 6: Property-Based** (catch edge cases)
//!   Random documents, paths and batches.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test subdoc_comprehensive
//!
//! # Run only semantic invariants (fastest)
//! cargo test --test subdoc_comprehensive invariant
//!
//! # Run property-based tests
//! cargo test --test subdoc_comprehensive property
//! ```



// Tier 2: Scenarios
mod scenario_tests;

// Tier 3: Path Syntax
mod path_syntax_tests;



// Tier 6: Property-Based
mod property_tests;
