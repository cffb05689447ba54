//! Database migrations

use anyhow::Result;
use motorpool_common::config::DatabaseConfig;
use motorpool_common::database;

/// Create the database when missing, then apply `migrations/`
pub async fn run_migrations(config: &DatabaseConfig) -> Result<()> {
    database::run_migrations(config, &sqlx::migrate!("./migrations")).await
}
