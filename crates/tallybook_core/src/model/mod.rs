//! Domain model for tracked items.
//!
//! # Responsibility
//! - Define the canonical task/note record shared by every other component.
//! - Enforce construction-time defaults (boards, category, priority).
//!
//! # Invariants
//! - The task/note discriminator is fixed at construction and never mutates.
//! - `timestamp` and `date` are immutable after construction.

pub mod item;
