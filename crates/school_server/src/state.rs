//! Shared handler state.

use crate::error::ApiError;
use log::error;
use school_core::{RepoResult, SchoolRepository, SchoolService};
use std::sync::Arc;

/// Store handle shared by every request.
pub type SharedRepository = Arc<dyn SchoolRepository>;

/// State injected into every handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    service: Arc<SchoolService<SharedRepository>>,
}

impl AppState {
    pub fn new(repo: SharedRepository) -> Self {
        Self {
            service: Arc::new(SchoolService::new(repo)),
        }
    }

    /// Runs a store-bound job off the async workers.
    ///
    /// A job that panics or is cancelled surfaces as a storage failure.
    pub async fn run<T, F>(&self, job: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&SchoolService<SharedRepository>) -> RepoResult<T> + Send + 'static,
    {
        let service = Arc::clone(&self.service);
        let outcome = tokio::task::spawn_blocking(move || job(&service))
            .await
            .map_err(|err| {
                error!("event=store_call module=http status=error error_code=join_failed error={err}");
                ApiError::Storage
            })?;
        outcome.map_err(ApiError::from)
    }
}
