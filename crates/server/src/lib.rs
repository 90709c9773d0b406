use std::sync::Arc;

use services::services::jobs::JobService;

pub mod config;
pub mod error;
pub mod routes;

/// Shared handler state: the explicitly constructed service object, injected
/// into handlers instead of module-level store handles.
#[derive(Clone)]
pub struct AppState {
    jobs: Arc<JobService>,
}

impl AppState {
    pub fn new(jobs: JobService) -> Self {
        Self {
            jobs: Arc::new(jobs),
        }
    }

    pub fn jobs(&self) -> &JobService {
        &self.jobs
    }
}
