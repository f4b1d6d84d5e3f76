//! Geographic primitives and proximity ranking.
//!
//! # Responsibility
//! - Represent WGS84 points in decimal degrees.
//! - Compute great-circle distances on a spherical Earth.
//! - Order located records by distance to a query point.
//!
//! # Invariants
//! - Ranking never mutates the ranked records; distances are paired, not stored.
//! - Ranking is stable: equal distances keep their input order.

pub mod coordinate;
pub mod distance;
pub mod ranking;
