//! HTTP route handlers for the customer service.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                       - Greeting
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (database)
//!
//! # Customers
//! GET    /api/customers          - List all customers
//! POST   /api/customers          - Create one customer
//! POST   /api/customers/list     - Create many customers (all or nothing)
//! GET    /api/customers/{id}     - Fetch one customer
//! PUT    /api/customers/{id}     - Partially update one customer
//! DELETE /api/customers/{id}     - Delete one customer
//!
//! # Documentation
//! GET    /api-docs               - Swagger UI
//! GET    /api-docs/openapi.json  - Generated OpenAPI document
//! ```

pub mod customers;
pub mod docs;
pub mod health;

use axum::{Router, routing::get};

use crate::config::ServerConfig;
use crate::state::AppState;

/// Greeting served at the root path.
pub async fn home() -> &'static str {
    "Hello World!"
}

/// Create all routes for the service.
pub fn routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(customers::router())
        .merge(docs::router(&config.base_url))
}
