//! Record store contracts and implementations.
//!
//! # Responsibility
//! - Define the store contract consumed by the service layer.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate the draft before touching storage.
//! - `list_schools` returns records in insertion order.
//! - A successful create is visible to every later list on the same store.

pub mod memory_repo;
pub mod school_repo;
