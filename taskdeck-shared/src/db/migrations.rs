/// Database migration runner
///
/// Migrations live in the `migrations/` directory at the workspace root and
/// are applied with sqlx's embedded migrator. The schema is owned by the
/// migration files rather than being synthesized at boot, so identifiers come
/// from the storage engine's own sequences and survive restarts.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed or fails to execute.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("../migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
