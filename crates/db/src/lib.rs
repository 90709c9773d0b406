use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub mod models;

/// Holds the connection pool for the remote store.
#[derive(Clone)]
pub struct DBService {
    pub pool: PgPool,
}

impl DBService {
    /// Connects lazily: the pool is created without touching the network, so
    /// the process starts even when the remote store is unreachable.
    pub fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            // short acquire deadline so callers fall back to the local store
            // promptly instead of waiting out the default 30s
            .acquire_timeout(Duration::from_secs(2))
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }
}
