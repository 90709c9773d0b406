use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::AppState;

/// Which store is currently serving requests
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub remote_store: bool,
    pub fallback_active: bool,
}

pub async fn health(State(state): State<AppState>) -> ResponseJson<ApiResponse<HealthStatus>> {
    let remote_store = state.jobs().remote_reachable().await;
    ResponseJson(ApiResponse::success(HealthStatus {
        remote_store,
        fallback_active: !remote_store,
    }))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/health", get(health))
}
