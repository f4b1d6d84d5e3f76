//! In-process school store.
//!
//! Keeps records in a `Vec` for callers that need the store contract without
//! SQLite, such as handler tests.

use super::school_repo::{RepoError, RepoResult, SchoolRepository};
use crate::model::school::{NewSchool, School};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemorySchoolRepository {
    schools: Mutex<Vec<School>>,
}

impl MemorySchoolRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> RepoResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Vec<School>>> {
        self.schools.lock().map_err(|_| RepoError::LockPoisoned)
    }
}

impl SchoolRepository for MemorySchoolRepository {
    fn create_school(&self, draft: &NewSchool) -> RepoResult<School> {
        draft.validate()?;
        let school = School::from_draft(Uuid::new_v4(), draft);
        self.lock()?.push(school.clone());
        Ok(school)
    }

    fn list_schools(&self) -> RepoResult<Vec<School>> {
        Ok(self.lock()?.clone())
    }
}
