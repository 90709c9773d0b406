use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Employment type of a posting
#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "job_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub description: String,
    pub requirements: String,
    pub salary: String,
    pub benefits: String,
    pub deadline: Option<NaiveDate>,
    pub is_active: bool,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job decorated with its derived application count
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct JobWithApplications {
    #[serde(flatten)]
    #[ts(flatten)]
    pub job: Job,
    pub applications: i64,
}

impl std::ops::Deref for JobWithApplications {
    type Target = Job;
    fn deref(&self) -> &Self::Target {
        &self.job
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateJob {
    pub title: String,
    pub department: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub benefits: String,
    pub deadline: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJob {
    pub title: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary: Option<String>,
    pub benefits: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

const JOB_COLUMNS: &str =
    "id, title, department, location, job_type, description, requirements, salary, benefits, \
     deadline, is_active, views, created_at, updated_at";

impl Job {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, data: &CreateJob) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs \
             (id, title, department, location, job_type, description, requirements, salary, benefits, deadline, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(&id)
        .bind(&data.title)
        .bind(&data.department)
        .bind(&data.location)
        .bind(data.job_type.clone().unwrap_or_default())
        .bind(&data.description)
        .bind(&data.requirements)
        .bind(&data.salary)
        .bind(&data.benefits)
        .bind(data.deadline)
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: &str,
        data: &UpdateJob,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET \
                title = COALESCE($2, title), \
                department = COALESCE($3, department), \
                location = COALESCE($4, location), \
                job_type = COALESCE($5, job_type), \
                description = COALESCE($6, description), \
                requirements = COALESCE($7, requirements), \
                salary = COALESCE($8, salary), \
                benefits = COALESCE($9, benefits), \
                deadline = COALESCE($10, deadline), \
                is_active = COALESCE($11, is_active), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.department)
        .bind(&data.location)
        .bind(data.job_type.clone())
        .bind(&data.description)
        .bind(&data.requirements)
        .bind(&data.salary)
        .bind(&data.benefits)
        .bind(data.deadline)
        .bind(data.is_active)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_views(
        pool: &PgPool,
        id: &str,
        views: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET views = $2, updated_at = now() WHERE id = $1 RETURNING {JOB_COLUMNS}"
        ))
        .bind(id)
        .bind(views)
        .fetch_optional(pool)
        .await
    }

    pub async fn set_active(
        pool: &PgPool,
        id: &str,
        is_active: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET is_active = $2, updated_at = now() WHERE id = $1 RETURNING {JOB_COLUMNS}"
        ))
        .bind(id)
        .bind(is_active)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_uses_kebab_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&JobType::FullTime).unwrap(),
            "\"full-time\""
        );
        assert_eq!(
            serde_json::from_str::<JobType>("\"part-time\"").unwrap(),
            JobType::PartTime
        );
    }

    #[test]
    fn job_type_defaults_to_full_time() {
        assert_eq!(JobType::default(), JobType::FullTime);
    }

    #[test]
    fn create_job_accepts_minimal_payload() {
        let data: CreateJob =
            serde_json::from_str(r#"{"title": "Engineer", "department": "IT"}"#).unwrap();
        assert_eq!(data.title, "Engineer");
        assert_eq!(data.department, "IT");
        assert!(data.job_type.is_none());
        assert!(data.location.is_empty());
        assert!(data.is_active.is_none());
    }

    #[test]
    fn job_serializes_camel_case_with_type_alias() {
        let job = Job {
            id: "1".into(),
            title: "Engineer".into(),
            department: "IT".into(),
            location: "Remote".into(),
            job_type: JobType::Contract,
            description: String::new(),
            requirements: String::new(),
            salary: String::new(),
            benefits: String::new(),
            deadline: None,
            is_active: true,
            views: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["type"], "contract");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["views"], 3);
        assert!(json.get("job_type").is_none());
    }

    #[test]
    fn job_with_applications_flattens_the_job() {
        let job = Job {
            id: "1".into(),
            title: "Engineer".into(),
            department: "IT".into(),
            location: String::new(),
            job_type: JobType::default(),
            description: String::new(),
            requirements: String::new(),
            salary: String::new(),
            benefits: String::new(),
            deadline: None,
            is_active: true,
            views: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let decorated = JobWithApplications {
            job,
            applications: 2,
        };
        let json = serde_json::to_value(&decorated).unwrap();
        assert_eq!(json["title"], "Engineer");
        assert_eq!(json["applications"], 2);
    }
}
