//! Database access for the customer service.
//!
//! # Database
//!
//! ## Tables
//!
//! - `customers` - Customer records (`email` is UNIQUE)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and embedded in the
//! binary. Run them via:
//! ```bash
//! cargo run -p customers-cli -- migrate
//! ```
//! or start the server with `CUSTOMERS_RUN_MIGRATIONS=true`.

pub mod customers;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use customers_core::{
    Customer, CustomerError, CustomerFields, CustomerId, CustomerIdError, CustomerPatch,
};

use crate::config::DatabaseConfig;

pub use customers::PgCustomerRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Payload rejected by the customer schema.
    #[error("validation failed: {0}")]
    Validation(#[from] CustomerError),

    /// Identifier is not in a format the store could have assigned.
    #[error("{0}")]
    InvalidId(#[from] CustomerIdError),
}

impl RepositoryError {
    /// Stable machine-readable name of the failure class.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::Conflict(_) => "conflict",
            Self::Validation(_) => "validation",
            Self::InvalidId(_) => "invalid_id",
        }
    }
}

/// Data-access operations for customer records.
///
/// Every method is a single store call. Lookups by id return `None` for an
/// unknown identifier; only genuine failures are errors.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers, in the store's natural scan order.
    async fn list(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// The customer with `id`, if any.
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Validate and insert one customer.
    async fn create(&self, fields: CustomerFields) -> Result<Customer, RepositoryError>;

    /// Validate and insert a batch, all or nothing, preserving input order.
    async fn create_many(
        &self,
        batch: Vec<CustomerFields>,
    ) -> Result<Vec<Customer>, RepositoryError>;

    /// Merge the supplied fields onto the customer with `id`.
    ///
    /// Returns the post-update record, or `None` if `id` is unknown.
    async fn update(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Remove the customer with `id`, returning its last state.
    async fn delete(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool.
///
/// Connects eagerly so that an unreachable database fails startup.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    settings: &DatabaseConfig,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url.expose_secret())
        .await
}

/// Apply embedded migrations from `crates/server/migrations/`.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
