//! Routes for job postings (dual-store CRUD).

use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use db::models::job::{CreateJob, Job, JobWithApplications, UpdateJob};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

/// Response for view-increment operations
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ViewCountResponse {
    pub views: i64,
}

/// List all jobs, newest first. Never fails: both stores unreadable yields
/// an empty array.
pub async fn list_jobs(State(state): State<AppState>) -> ResponseJson<ApiResponse<Vec<Job>>> {
    ResponseJson(ApiResponse::success(state.jobs().list().await))
}

/// List active jobs, each decorated with its derived application count
pub async fn list_active_jobs(
    State(state): State<AppState>,
) -> ResponseJson<ApiResponse<Vec<JobWithApplications>>> {
    ResponseJson(ApiResponse::success(state.jobs().list_active().await))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Job>>, ApiError> {
    let job = state.jobs().get(&id).await?;
    Ok(ResponseJson(ApiResponse::success(job)))
}

pub async fn create_job(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateJob>,
) -> Result<ResponseJson<ApiResponse<Job>>, ApiError> {
    let job = state.jobs().create(payload).await?;
    Ok(ResponseJson(ApiResponse::success(job)))
}

pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    axum::Json(payload): axum::Json<UpdateJob>,
) -> Result<ResponseJson<ApiResponse<Job>>, ApiError> {
    let job = state.jobs().update(&id, payload).await?;
    Ok(ResponseJson(ApiResponse::success(job)))
}

pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    state.jobs().delete(&id).await?;
    Ok(ResponseJson(ApiResponse::success_with_message(
        (),
        "Job deleted successfully",
    )))
}

pub async fn increment_job_views(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<ViewCountResponse>>, ApiError> {
    let views = state.jobs().increment_views(&id).await?;
    Ok(ResponseJson(ApiResponse::success(ViewCountResponse {
        views,
    })))
}

pub async fn toggle_job_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Job>>, ApiError> {
    let job = state.jobs().toggle_active(&id).await?;
    Ok(ResponseJson(ApiResponse::success(job)))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().nest(
        "/jobs",
        Router::new()
            .route("/", get(list_jobs).post(create_job))
            .route("/active", get(list_active_jobs))
            .route(
                "/{id}",
                get(get_job).put(update_job).delete(delete_job),
            )
            .route("/{id}/view", post(increment_job_views))
            .route("/{id}/toggle", put(toggle_job_active)),
    )
}
