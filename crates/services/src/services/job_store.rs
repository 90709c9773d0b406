//! Flat-file fallback store: one JSON array per collection, read in full and
//! rewritten in full on every mutation.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use db::models::{application::Application, job::Job};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Debug, Error)]
pub enum JobStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Local fallback store. Mutations are serialized through `write_lock` and
/// each rewrite goes through a temp file + atomic rename, so concurrent
/// fallback writers cannot lose each other's records.
pub struct JobStore {
    jobs_path: PathBuf,
    applications_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JobStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let dir = data_dir.into();
        Self {
            jobs_path: dir.join("jobs.json"),
            applications_path: dir.join("applications.json"),
            write_lock: Mutex::new(()),
        }
    }

    /// Read failure (missing, unreadable or unparseable file) is recovered by
    /// treating the collection as empty.
    pub fn read_jobs(&self) -> Vec<Job> {
        read_collection(&self.jobs_path)
    }

    pub fn read_applications(&self) -> Vec<Application> {
        read_collection(&self.applications_path)
    }

    pub fn find_job(&self, id: &str) -> Option<Job> {
        self.read_jobs().into_iter().find(|job| job.id == id)
    }

    /// New records go to the head of the list.
    pub async fn insert_job(&self, job: Job) -> Result<Job, JobStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.read_jobs();
        jobs.insert(0, job.clone());
        write_collection(&self.jobs_path, &jobs)?;
        Ok(job)
    }

    /// Applies `apply` to the matching record and stamps `updated_at`.
    /// Returns `None` when no record has that id.
    pub async fn modify_job<F>(&self, id: &str, apply: F) -> Result<Option<Job>, JobStoreError>
    where
        F: FnOnce(&mut Job),
    {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.read_jobs();
        let Some(job) = jobs.iter_mut().find(|job| job.id == id) else {
            return Ok(None);
        };
        apply(job);
        job.updated_at = chrono::Utc::now();
        let updated = job.clone();
        write_collection(&self.jobs_path, &jobs)?;
        Ok(Some(updated))
    }

    pub async fn remove_job(&self, id: &str) -> Result<bool, JobStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut jobs = self.read_jobs();
        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        if jobs.len() == before {
            return Ok(false);
        }
        write_collection(&self.jobs_path, &jobs)?;
        Ok(true)
    }

    /// The local applications file carries no job ids, so matching is by
    /// denormalized department + title.
    pub fn count_applications(&self, department: &str, job_title: &str) -> i64 {
        self.read_applications()
            .iter()
            .filter(|app| app.department == department && app.job_title == job_title)
            .count() as i64
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "failed to read local store");
            }
            return Vec::new();
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(items) => items,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse local store, treating as empty");
            Vec::new()
        }
    }
}

fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), JobStoreError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, items)?;
    tmp.write_all(b"\n")?;
    tmp.persist(path).map_err(|e| JobStoreError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use db::models::job::JobType;
    use tempfile::TempDir;

    use super::*;

    fn sample_job(id: &str, title: &str) -> Job {
        let now = Utc::now();
        Job {
            id: id.to_string(),
            title: title.to_string(),
            department: "IT".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::default(),
            description: String::new(),
            requirements: String::new(),
            salary: String::new(),
            benefits: String::new(),
            deadline: None,
            is_active: true,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn insert_prepends_to_the_list() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());

        store.insert_job(sample_job("1", "First")).await.unwrap();
        store.insert_job(sample_job("2", "Second")).await.unwrap();

        let jobs = store.read_jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, "2");
        assert_eq!(jobs[1].id, "1");
    }

    #[tokio::test]
    async fn modify_stamps_updated_at() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());
        let created = store.insert_job(sample_job("1", "First")).await.unwrap();

        let updated = store
            .modify_job("1", |job| job.views += 1)
            .await
            .unwrap()
            .expect("job should exist");

        assert_eq!(updated.views, 1);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(store.find_job("1").unwrap().views, 1);
    }

    #[tokio::test]
    async fn modify_missing_id_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());
        let result = store.modify_job("missing", |job| job.views += 1).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn remove_reports_whether_anything_was_deleted() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());
        store.insert_job(sample_job("1", "First")).await.unwrap();

        assert!(store.remove_job("1").await.unwrap());
        assert!(!store.remove_job("1").await.unwrap());
        assert!(store.read_jobs().is_empty());
    }

    #[test]
    fn unparseable_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("jobs.json"), b"not json at all").unwrap();
        let store = JobStore::new(dir.path());
        assert!(store.read_jobs().is_empty());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = JobStore::new(dir.path());
        assert!(store.read_jobs().is_empty());
        assert!(store.read_applications().is_empty());
    }

    #[test]
    fn count_applications_matches_department_and_title() {
        let dir = TempDir::new().unwrap();
        let apps = serde_json::json!([
            {"id": "a1", "jobId": null, "name": "Ada", "email": "ada@example.com",
             "phone": null, "department": "IT", "jobTitle": "Engineer",
             "createdAt": "2026-01-15T10:00:00Z"},
            {"id": "a2", "jobId": null, "name": "Grace", "email": "grace@example.com",
             "phone": null, "department": "IT", "jobTitle": "Engineer",
             "createdAt": "2026-01-16T10:00:00Z"},
            {"id": "a3", "jobId": null, "name": "Alan", "email": "alan@example.com",
             "phone": null, "department": "HR", "jobTitle": "Engineer",
             "createdAt": "2026-01-17T10:00:00Z"}
        ]);
        std::fs::write(
            dir.path().join("applications.json"),
            serde_json::to_vec(&apps).unwrap(),
        )
        .unwrap();

        let store = JobStore::new(dir.path());
        assert_eq!(store.count_applications("IT", "Engineer"), 2);
        assert_eq!(store.count_applications("HR", "Engineer"), 1);
        assert_eq!(store.count_applications("IT", "Manager"), 0);
    }
}
