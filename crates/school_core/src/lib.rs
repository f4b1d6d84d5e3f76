//! Core domain logic for the school locator.
//! This crate owns the record shape, its validation, persistence and the
//! proximity ranking used by the HTTP layer.

pub mod db;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use geo::coordinate::{parse_degrees, Coordinate};
pub use geo::distance::{haversine_km, EARTH_RADIUS_KM};
pub use geo::ranking::{rank_by_distance, Located, Ranked, RankedSchool};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::school::{NewSchool, School, SchoolId, SchoolValidationError};
pub use repo::memory_repo::MemorySchoolRepository;
pub use repo::school_repo::{RepoError, RepoResult, SchoolRepository, SqliteSchoolRepository};
pub use service::school_service::SchoolService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
