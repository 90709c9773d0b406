use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod health;
pub mod jobs;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            jobs::router(&state).merge(health::router(&state)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
