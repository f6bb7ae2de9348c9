//! End-to-end tests for `/api/customers`.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database
//! - The server running (cargo run -p customers-server)

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use customers_core::Customer;
use customers_integration_tests::{base_url, customer_url, customers_url, unique_customer};

/// Syntactically valid, never assigned.
const UNKNOWN_ID: &str = "00000000-0000-4000-8000-000000000000";

async fn create(client: &Client, body: &Value) -> Customer {
    let resp = client
        .post(customers_url())
        .json(body)
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["message"], "Customer added successfully");
    serde_json::from_value(body["customer"].clone()).expect("Response is not a customer")
}

async fn status_of(resp: reqwest::Result<reqwest::Response>) -> StatusCode {
    resp.expect("Request failed").status()
}

// ============================================================================
// Service
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_root_and_health() {
    let client = Client::new();

    let resp = client.get(base_url()).send().await.expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "Hello World!");

    let ready = client.get(format!("{}/health/ready", base_url())).send().await;
    assert_eq!(status_of(ready).await, StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_openapi_document() {
    let doc: Value = Client::new()
        .get(format!("{}/api-docs/openapi.json", base_url()))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Document is not JSON");

    assert_eq!(doc["info"]["title"], "Customer Management API");
    assert!(doc["paths"]["/api/customers/{id}"]["delete"].is_object());
}

// ============================================================================
// Create & Read
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_create_then_get() {
    let client = Client::new();
    let created = create(&client, &unique_customer("Alice Guo")).await;

    let resp = client
        .get(customer_url(&created.id.to_string()))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Customer = resp.json().await.expect("Response is not a customer");
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_list_includes_created_customer() {
    let client = Client::new();
    let created = create(&client, &unique_customer("Mikha Lim")).await;

    let all: Vec<Customer> = client
        .get(customers_url())
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Response is not a customer list");

    assert!(all.iter().any(|c| c.id == created.id));
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_duplicate_email_is_rejected() {
    let client = Client::new();
    let body = unique_customer("Alice Guo");
    create(&client, &body).await;

    let resp = client
        .post(customers_url())
        .json(&body)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["message"], "Error adding customer");
    assert_eq!(body["error"]["kind"], "conflict");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_missing_field_is_rejected() {
    let mut body = unique_customer("Alice Guo");
    body.as_object_mut().expect("object").remove("phone");

    let resp = Client::new().post(customers_url()).json(&body).send().await;
    assert_eq!(status_of(resp).await, StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Bulk Create
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_bulk_create_preserves_order() {
    let resp = Client::new()
        .post(format!("{}/list", customers_url()))
        .json(&json!([unique_customer("A"), unique_customer("B")]))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["message"], "Customers added successfully!");
    let customers: Vec<Customer> =
        serde_json::from_value(body["customers"].clone()).expect("Not a customer list");
    let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_bulk_create_rejects_non_array() {
    let resp = Client::new()
        .post(format!("{}/list", customers_url()))
        .json(&unique_customer("A"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["message"], "Invalid input, expected an array of objects.");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_bulk_create_is_all_or_nothing() {
    let client = Client::new();
    let survivor = unique_customer("Survivor");
    let survivor_email = survivor["email"].as_str().expect("email").to_owned();
    let mut incomplete = unique_customer("Incomplete");
    incomplete.as_object_mut().expect("object").remove("address");
    let batch = json!([survivor, incomplete]);

    let resp = client
        .post(format!("{}/list", customers_url()))
        .json(&batch)
        .send()
        .await;
    assert_eq!(status_of(resp).await, StatusCode::INTERNAL_SERVER_ERROR);

    let all: Vec<Customer> = client
        .get(customers_url())
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Response is not a customer list");
    assert!(all.iter().all(|c| c.email.as_str() != survivor_email));
}

// ============================================================================
// Update & Delete
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_update_changes_only_supplied_fields() {
    let client = Client::new();
    let created = create(&client, &unique_customer("Alice Guo")).await;

    let resp = client
        .put(customer_url(&created.id.to_string()))
        .json(&json!({"name": "Alice Updated"}))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["message"], "Customer updated successfully");
    let updated: Customer =
        serde_json::from_value(body["customer"].clone()).expect("Not a customer");
    assert_eq!(updated.name, "Alice Updated");
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.phone, created.phone);
    assert_eq!(updated.address, created.address);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_delete_then_get_is_not_found() {
    let client = Client::new();
    let created = create(&client, &unique_customer("Alice Guo")).await;
    let url = customer_url(&created.id.to_string());

    let resp = client.delete(&url).send().await.expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to read response");
    assert_eq!(body["message"], "Customer deleted successfully");

    assert_eq!(status_of(client.get(&url).send().await).await, StatusCode::NOT_FOUND);
    assert_eq!(status_of(client.delete(&url).send().await).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_unknown_and_malformed_ids() {
    let client = Client::new();

    let unknown = customer_url(UNKNOWN_ID);
    assert_eq!(status_of(client.get(&unknown).send().await).await, StatusCode::NOT_FOUND);
    let patch = json!({"name": "Nobody"});
    assert_eq!(
        status_of(client.put(&unknown).json(&patch).send().await).await,
        StatusCode::NOT_FOUND
    );

    let malformed = customer_url("60d21b4967d0d8992e610c8");
    for resp in [
        client.get(&malformed).send().await,
        client.put(&malformed).json(&patch).send().await,
        client.delete(&malformed).send().await,
    ] {
        assert_eq!(status_of(resp).await, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
