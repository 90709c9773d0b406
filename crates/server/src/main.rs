use anyhow::Context;
use db::DBService;
use server::{AppState, config::Config, routes};
use services::services::{job_store::JobStore, jobs::JobService};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = DBService::new(&config.database_url)?;
    let store = JobStore::new(&config.fallback_data_dir);
    let state = AppState::new(JobService::new(db, store));

    let app = routes::router(state);
    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    info!(addr = %config.addr(), "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
