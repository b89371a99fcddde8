//! Database migration command.
//!
//! Applies `crates/api/migrations/` to the database named by
//! `BUGSTORE_DATABASE_URL` (or `DATABASE_URL`). Already-applied migrations
//! are skipped, so the command is safe to rerun.

use bugstore_api::config::ConfigError;
use bugstore_api::db;

/// Errors from running migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if no database URL is configured, the
/// connection fails, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
