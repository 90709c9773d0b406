//! Derived application counts: one interface, two implementations, selected
//! by a single fallback decision in the job service.

use async_trait::async_trait;
use db::models::{application::Application, job::Job};
use sqlx::PgPool;

use super::job_store::JobStore;

#[async_trait]
pub trait ApplicationCounter {
    async fn count(&self, job: &Job) -> anyhow::Result<i64>;
}

/// Counts applications in the remote store by job id.
pub struct RemoteApplicationCounter<'a> {
    pool: &'a PgPool,
}

impl<'a> RemoteApplicationCounter<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationCounter for RemoteApplicationCounter<'_> {
    async fn count(&self, job: &Job) -> anyhow::Result<i64> {
        Ok(Application::count_by_job_id(self.pool, &job.id).await?)
    }
}

/// Scans the local applications file, matching on department + title.
pub struct LocalApplicationCounter<'a> {
    store: &'a JobStore,
}

impl<'a> LocalApplicationCounter<'a> {
    pub fn new(store: &'a JobStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ApplicationCounter for LocalApplicationCounter<'_> {
    async fn count(&self, job: &Job) -> anyhow::Result<i64> {
        Ok(self.store.count_applications(&job.department, &job.title))
    }
}
