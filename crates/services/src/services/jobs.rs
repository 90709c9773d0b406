//! Dual-store record service for job postings: every operation prefers the
//! remote Postgres store and degrades to the local flat-file store when the
//! remote is unavailable. Remote errors are classified only as "try
//! fallback" — no retries, no backoff, no failure-kind distinction.

use chrono::Utc;
use db::{
    DBService,
    models::job::{CreateJob, Job, JobWithApplications, UpdateJob},
};
use thiserror::Error;
use tracing::{debug, warn};

use super::{
    application_count::{ApplicationCounter, LocalApplicationCounter, RemoteApplicationCounter},
    job_store::{JobStore, JobStoreError},
};

#[derive(Debug, Error)]
pub enum JobServiceError {
    #[error("job not found")]
    NotFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("local store error: {0}")]
    Storage(#[from] JobStoreError),
}

/// Holds both store handles explicitly; handlers receive it via state
/// injection rather than module-level singletons.
pub struct JobService {
    db: DBService,
    store: JobStore,
}

impl JobService {
    pub fn new(db: DBService, store: JobStore) -> Self {
        Self { db, store }
    }

    pub async fn remote_reachable(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db.pool).await.is_ok()
    }

    /// Never errors: a remote failure, or a remote success with no rows,
    /// falls back to the local file; if that is unreadable too the result is
    /// the empty list. Newest first either way (the local file keeps newest
    /// at the head).
    pub async fn list(&self) -> Vec<Job> {
        match Job::find_all(&self.db.pool).await {
            Ok(jobs) if !jobs.is_empty() => jobs,
            Ok(_) => {
                debug!("remote store returned no jobs, reading local store");
                self.store.read_jobs()
            }
            Err(e) => {
                warn!(error = %e, "remote list failed, reading local store");
                self.store.read_jobs()
            }
        }
    }

    /// Active jobs decorated with their derived application counts. The
    /// counter implementation is chosen by one fallback decision per job:
    /// remote count first, local scan on error, zero if both fail.
    pub async fn list_active(&self) -> Vec<JobWithApplications> {
        let jobs = self.list().await;
        let remote = RemoteApplicationCounter::new(&self.db.pool);
        let local = LocalApplicationCounter::new(&self.store);

        let mut decorated = Vec::with_capacity(jobs.len());
        for job in jobs.into_iter().filter(|job| job.is_active) {
            let applications = match remote.count(&job).await {
                Ok(n) => n,
                Err(e) => {
                    debug!(job_id = %job.id, error = %e, "remote count failed, scanning local applications");
                    local.count(&job).await.unwrap_or(0)
                }
            };
            decorated.push(JobWithApplications { job, applications });
        }
        decorated
    }

    /// Fallback applies here uniformly: on a remote error the local store is
    /// consulted, and NotFound means the id is absent from whichever store
    /// answered.
    pub async fn get(&self, id: &str) -> Result<Job, JobServiceError> {
        match Job::find_by_id(&self.db.pool, id).await {
            Ok(Some(job)) => Ok(job),
            Ok(None) => Err(JobServiceError::NotFound),
            Err(e) => {
                warn!(id, error = %e, "remote read failed, consulting local store");
                self.store.find_job(id).ok_or(JobServiceError::NotFound)
            }
        }
    }

    /// Validates before touching any store. On remote failure a local record
    /// is synthesized with a time-derived id and prepended to the file.
    pub async fn create(&self, data: CreateJob) -> Result<Job, JobServiceError> {
        if data.title.trim().is_empty() {
            return Err(JobServiceError::InvalidInput("title is required".into()));
        }
        if data.department.trim().is_empty() {
            return Err(JobServiceError::InvalidInput(
                "department is required".into(),
            ));
        }

        match Job::create(&self.db.pool, &data).await {
            Ok(job) => Ok(job),
            Err(e) => {
                warn!(error = %e, "remote create failed, writing to local store");
                let now = Utc::now();
                // Millisecond timestamp, bumped past any id already in the
                // file so rapid fallback creates cannot collide.
                let mut id = now.timestamp_millis();
                while self.store.find_job(&id.to_string()).is_some() {
                    id += 1;
                }
                let job = Job {
                    id: id.to_string(),
                    title: data.title,
                    department: data.department,
                    location: data.location,
                    job_type: data.job_type.unwrap_or_default(),
                    description: data.description,
                    requirements: data.requirements,
                    salary: data.salary,
                    benefits: data.benefits,
                    deadline: data.deadline,
                    is_active: data.is_active.unwrap_or(true),
                    views: 0,
                    created_at: now,
                    updated_at: now,
                };
                Ok(self.store.insert_job(job).await?)
            }
        }
    }

    pub async fn update(&self, id: &str, data: UpdateJob) -> Result<Job, JobServiceError> {
        match Job::update(&self.db.pool, id, &data).await {
            Ok(Some(job)) => Ok(job),
            Ok(None) => Err(JobServiceError::NotFound),
            Err(e) => {
                warn!(id, error = %e, "remote update failed, merging into local store");
                self.store
                    .modify_job(id, |job| apply_update(job, data))
                    .await?
                    .ok_or(JobServiceError::NotFound)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), JobServiceError> {
        match Job::delete(&self.db.pool, id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(JobServiceError::NotFound),
            Err(e) => {
                warn!(id, error = %e, "remote delete failed, removing from local store");
                if self.store.remove_job(id).await? {
                    Ok(())
                } else {
                    Err(JobServiceError::NotFound)
                }
            }
        }
    }

    /// Read-modify-write: if the remote read fails the whole operation runs
    /// locally; if the read succeeds but the remote write fails, the
    /// increment still lands in the local store so it is never dropped.
    pub async fn increment_views(&self, id: &str) -> Result<i64, JobServiceError> {
        match Job::find_by_id(&self.db.pool, id).await {
            Ok(Some(job)) => match Job::set_views(&self.db.pool, id, job.views + 1).await {
                Ok(Some(updated)) => Ok(updated.views),
                Ok(None) => Err(JobServiceError::NotFound),
                Err(e) => {
                    warn!(id, error = %e, "remote view write failed, applying increment locally");
                    self.local_increment_views(id).await
                }
            },
            Ok(None) => Err(JobServiceError::NotFound),
            Err(e) => {
                warn!(id, error = %e, "remote read failed, applying increment locally");
                self.local_increment_views(id).await
            }
        }
    }

    async fn local_increment_views(&self, id: &str) -> Result<i64, JobServiceError> {
        self.store
            .modify_job(id, |job| job.views += 1)
            .await?
            .map(|job| job.views)
            .ok_or(JobServiceError::NotFound)
    }

    /// Same fallback shape as `increment_views`.
    pub async fn toggle_active(&self, id: &str) -> Result<Job, JobServiceError> {
        match Job::find_by_id(&self.db.pool, id).await {
            Ok(Some(job)) => match Job::set_active(&self.db.pool, id, !job.is_active).await {
                Ok(Some(updated)) => Ok(updated),
                Ok(None) => Err(JobServiceError::NotFound),
                Err(e) => {
                    warn!(id, error = %e, "remote toggle write failed, applying locally");
                    self.local_toggle_active(id).await
                }
            },
            Ok(None) => Err(JobServiceError::NotFound),
            Err(e) => {
                warn!(id, error = %e, "remote read failed, toggling locally");
                self.local_toggle_active(id).await
            }
        }
    }

    async fn local_toggle_active(&self, id: &str) -> Result<Job, JobServiceError> {
        self.store
            .modify_job(id, |job| job.is_active = !job.is_active)
            .await?
            .ok_or(JobServiceError::NotFound)
    }
}

fn apply_update(job: &mut Job, data: UpdateJob) {
    if let Some(title) = data.title {
        job.title = title;
    }
    if let Some(department) = data.department {
        job.department = department;
    }
    if let Some(location) = data.location {
        job.location = location;
    }
    if let Some(job_type) = data.job_type {
        job.job_type = job_type;
    }
    if let Some(description) = data.description {
        job.description = description;
    }
    if let Some(requirements) = data.requirements {
        job.requirements = requirements;
    }
    if let Some(salary) = data.salary {
        job.salary = salary;
    }
    if let Some(benefits) = data.benefits {
        job.benefits = benefits;
    }
    if let Some(deadline) = data.deadline {
        job.deadline = Some(deadline);
    }
    if let Some(is_active) = data.is_active {
        job.is_active = is_active;
    }
}
