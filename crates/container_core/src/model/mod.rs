//! Record and query model for the container list.
//!
//! # Responsibility
//! - Define the wire shape of container records and the load payload.
//! - Define the query state (search term + sort order) driving derivation.
//!
//! # Invariants
//! - A record participates in views only when it carries a non-empty name.
//! - Owned and shared collections never share records.

pub mod container;
pub mod query;
