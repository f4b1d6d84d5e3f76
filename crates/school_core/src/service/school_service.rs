//! School use-case service.
//!
//! # Responsibility
//! - Provide the add and proximity-list entry points for callers.
//! - Delegate persistence to a `SchoolRepository` and ranking to `geo`.
//!
//! # Invariants
//! - The query origin is validated before the store is touched.
//! - Ranking runs over a full snapshot taken by one `list_schools` call.

use crate::geo::coordinate::Coordinate;
use crate::geo::ranking::{rank_by_distance, RankedSchool};
use crate::model::school::{NewSchool, School};
use crate::repo::school_repo::{RepoError, RepoResult, SchoolRepository};
use log::{debug, error, info, warn};
use std::time::Instant;

/// Use-case service over any school store.
pub struct SchoolService<R: SchoolRepository> {
    repo: R,
}

impl<R: SchoolRepository> SchoolService<R> {
    /// Creates a service using the provided store implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new school.
    ///
    /// Returns the stored record with its assigned identity. Validation
    /// failures come back as `RepoError::Validation` and nothing is stored.
    pub fn add_school(&self, draft: &NewSchool) -> RepoResult<School> {
        let started_at = Instant::now();
        match self.repo.create_school(draft) {
            Ok(school) => {
                info!(
                    "event=school_create module=service status=ok school_id={} duration_ms={}",
                    school.id,
                    started_at.elapsed().as_millis()
                );
                Ok(school)
            }
            Err(err) if err.is_validation() => {
                warn!(
                    "event=school_create module=service status=rejected field={} error={}",
                    validation_field(&err),
                    err
                );
                Err(err)
            }
            Err(err) => {
                error!(
                    "event=school_create module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Returns every stored school in insertion order.
    pub fn list_all(&self) -> RepoResult<Vec<School>> {
        self.repo.list_schools()
    }

    /// Returns every stored school ranked by distance to `origin`, nearest
    /// first.
    pub fn list_nearest(&self, origin: Coordinate) -> RepoResult<Vec<RankedSchool>> {
        origin.validate()?;

        let started_at = Instant::now();
        let schools = self.repo.list_schools().map_err(|err| {
            error!(
                "event=school_list module=service status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            err
        })?;
        let ranked = rank_by_distance(origin, schools);

        debug!(
            "event=school_list module=service status=ok count={} duration_ms={}",
            ranked.len(),
            started_at.elapsed().as_millis()
        );
        Ok(ranked)
    }
}

fn validation_field(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(inner) => inner.field().unwrap_or("-"),
        _ => "-",
    }
}
