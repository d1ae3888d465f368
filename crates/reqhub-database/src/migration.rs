//! Database migration runner and schema check.

use sqlx::PgPool;
use tracing::info;

use reqhub_core::error::{AppError, ErrorKind};

/// Tables the stores read and write.
pub const SCHEMA_TABLES: [&str; 4] = ["collections", "folders", "folder_closures", "requests"];

/// Run all pending database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database migrations completed successfully");
    Ok(())
}

/// Fail with a configuration error when any of [`SCHEMA_TABLES`] is
/// missing, for deployments that apply migrations out of band.
pub async fn verify_schema(pool: &PgPool) -> Result<(), AppError> {
    let missing: Vec<String> = sqlx::query_scalar(
        "SELECT t FROM UNNEST($1::text[]) AS t WHERE to_regclass(t) IS NULL",
    )
    .bind(SCHEMA_TABLES.to_vec())
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to inspect schema", e))?;

    if !missing.is_empty() {
        return Err(AppError::configuration(format!(
            "Database schema is incomplete, missing tables: {}; enable database.run_migrations",
            missing.join(", ")
        )));
    }
    Ok(())
}
