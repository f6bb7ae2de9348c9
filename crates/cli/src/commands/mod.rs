//! CLI command implementations.

pub mod migrate;
pub mod seed;

use sqlx::PgPool;

use customers_server::config::{self, ConfigError, DatabaseConfig};
use customers_server::db::{self, RepositoryError};

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Connect using the same database variables as the server.
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = config::database_url_from_env()?;
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url, &DatabaseConfig::default()).await?;
    Ok(pool)
}
