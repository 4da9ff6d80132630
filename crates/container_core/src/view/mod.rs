//! View derivation entry points.
//!
//! # Responsibility
//! - Turn one collection plus a query into an ordered, filtered view.
//! - Keep derivation pure: no I/O, no shared state, no faults.
//!
//! # Invariants
//! - Every record in a derived view carries a usable name.
//! - Filtering keeps the relative order of matching records.
//! - Sorting is stable; there is no secondary tie-break key.

pub mod collation;
pub mod engine;
