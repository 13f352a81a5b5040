//! Predicate and grouping engine.
//!
//! # Responsibility
//! - Narrow collections by attribute keywords.
//! - Group items by board membership or creation date.
//! - Compute display statistics.
//!
//! # Invariants
//! - Queries never mutate the input collection; they return new mappings.
//! - Board discovery always yields the sentinel board first.

pub mod filter;
pub mod group;
pub mod stats;
