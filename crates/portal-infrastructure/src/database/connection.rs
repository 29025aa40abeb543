//! Database connection pool

use portal_shared::config::DatabaseSettings;
use portal_shared::constants::DB_ACQUIRE_TIMEOUT_SECONDS;
use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(DB_ACQUIRE_TIMEOUT_SECONDS))
        .connect(&settings.url)
        .await
}

/// Applies the embedded schema and catalog migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
