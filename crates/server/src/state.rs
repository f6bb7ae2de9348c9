//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::db::{CustomerStore, PgCustomerRepository};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the connection pool, and the customer accessor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: Option<PgPool>,
    customers: Arc<dyn CustomerStore>,
}

impl AppState {
    /// Create the production state, with customers stored in `PostgreSQL`.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let customers = Arc::new(PgCustomerRepository::new(pool.clone()));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool: Some(pool),
                customers,
            }),
        }
    }

    /// Create a state around any accessor, without a database pool.
    ///
    /// The readiness probe reports unavailable for such a state.
    #[must_use]
    pub fn with_store(config: ServerConfig, customers: Arc<dyn CustomerStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool: None,
                customers,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool, if there is one.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Get the customer accessor.
    #[must_use]
    pub fn customers(&self) -> &dyn CustomerStore {
        self.inner.customers.as_ref()
    }
}
