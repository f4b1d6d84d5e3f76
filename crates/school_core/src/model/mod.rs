//! Domain model for school records.
//!
//! # Responsibility
//! - Define the persisted record shape and its create draft.
//! - Keep field validation next to the data it guards.
//!
//! # Invariants
//! - Every stored school is identified by a store-assigned `SchoolId`.
//! - Records are never mutated or deleted once stored.

pub mod school;
