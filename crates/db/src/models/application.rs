use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use ts_rs::TS;

/// One submitted application. `department` and `job_title` are denormalized
/// copies of the posting's fields so the local-file counter can match
/// applications to jobs without an id join.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub job_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub job_title: String,
    pub created_at: DateTime<Utc>,
}

impl Application {
    pub async fn count_by_job_id(pool: &PgPool, job_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE job_id = $1")
            .bind(job_id)
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_round_trips_camel_case() {
        let json = r#"{
            "id": "a1",
            "jobId": "j1",
            "name": "Ada",
            "email": "ada@example.com",
            "phone": null,
            "department": "IT",
            "jobTitle": "Engineer",
            "createdAt": "2026-01-15T10:00:00Z"
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.job_id.as_deref(), Some("j1"));
        assert_eq!(app.job_title, "Engineer");
    }
}
