//! Database migration command.
//!
//! Applies the migrations embedded in `customers-server`
//! (`crates/server/migrations/`). Already-applied migrations are skipped.

use customers_server::db;

use super::{CommandError, connect};

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails, or
/// a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
