//! Integration tests for the customer service.
//!
//! The tests in `tests/` talk HTTP to a running server and are ignored by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server against a migrated database
//! CUSTOMERS_RUN_MIGRATIONS=true cargo run -p customers-server
//!
//! # Run integration tests
//! cargo test -p customers-integration-tests -- --ignored
//! ```
//!
//! Set `CUSTOMERS_BASE_URL` to target a server other than
//! `http://localhost:5000`.

use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("CUSTOMERS_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// URL of the customer collection.
#[must_use]
pub fn customers_url() -> String {
    format!("{}/api/customers", base_url())
}

/// URL of a single customer.
#[must_use]
pub fn customer_url(id: &str) -> String {
    format!("{}/{id}", customers_url())
}

/// A complete customer body whose email no other test run has used.
#[must_use]
pub fn unique_customer(name: &str) -> Value {
    json!({
        "name": name,
        "email": format!("{}@integration.test", Uuid::new_v4()),
        "phone": "555-888-7000",
        "address": "123 Main St, Anytown, USA"
    })
}
