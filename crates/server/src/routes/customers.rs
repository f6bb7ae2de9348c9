//! Customer resource handlers.
//!
//! Each handler makes at most one accessor call and maps its outcome to a
//! status code: the absent marker becomes 404, any accessor failure becomes
//! 500 with the failure embedded in the body.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use utoipa::ToSchema;

use customers_core::{Customer, CustomerError, CustomerFields, CustomerId, CustomerPatch};

use crate::error::{AppError, ErrorResponse, Result};
use crate::state::AppState;

const LIST_FAILED: &str = "Error fetching customers";
const GET_FAILED: &str = "Error fetching customer";
const CREATE_FAILED: &str = "Error adding customer";
const BULK_CREATE_FAILED: &str = "Error adding customers";
const UPDATE_FAILED: &str = "Error updating customer";
const DELETE_FAILED: &str = "Error deleting customer";

/// Message for a bulk-create body that is not a JSON array.
pub const INVALID_BULK_INPUT: &str = "Invalid input, expected an array of objects.";

/// Build the customer resource router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/customers", get(list_customers).post(add_customer))
        .route("/api/customers/list", post(add_customers))
        .route(
            "/api/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

/// A single customer with a confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    #[schema(example = "Customer added successfully")]
    pub message: String,
    pub customer: Customer,
}

/// Several customers with a confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomersResponse {
    #[schema(example = "Customers added successfully!")]
    pub message: String,
    pub customers: Vec<Customer>,
}

/// Decode one customer object from a request body.
///
/// Only JSON objects are accepted; serde would otherwise also read a
/// positional array into the struct. Wrong-typed fields are reported the
/// same way as failed validation.
fn customer_record<T: DeserializeOwned>(value: Value) -> std::result::Result<T, CustomerError> {
    if !value.is_object() {
        return Err(CustomerError::InvalidRecord(
            "expected a customer object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| CustomerError::InvalidRecord(e.to_string()))
}

impl CustomerResponse {
    fn json(message: &str, customer: Customer) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
            customer,
        })
    }
}

/// Get all customers
///
/// Return a list of all customers.
///
/// # Errors
///
/// Returns a 500 response if the store query fails.
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "A list of customers", body = [Customer]),
        (status = 500, description = "Server error", body = ErrorResponse),
    )
)]
pub async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let customers = state
        .customers()
        .list()
        .await
        .map_err(AppError::operation(LIST_FAILED))?;

    Ok(Json(customers))
}

/// Get a customer by ID
///
/// Retrieve a single customer by their ID.
///
/// # Errors
///
/// Returns 404 for an unknown id, 500 for a malformed id or a store failure.
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "The customer ID")),
    responses(
        (status = 200, description = "Customer details by id", body = Customer),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse),
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>> {
    let id = CustomerId::parse(&id).map_err(AppError::operation(GET_FAILED))?;

    state
        .customers()
        .get(id)
        .await
        .map_err(AppError::operation(GET_FAILED))?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Add a new customer
///
/// Create a new customer record. All four fields are required and the email
/// must not belong to another customer.
///
/// # Errors
///
/// Returns a 500 response if validation or the insert fails.
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Customers",
    request_body = CustomerFields,
    responses(
        (status = 201, description = "Customer created successfully", body = CustomerResponse),
        (status = 500, description = "Server error", body = ErrorResponse),
    )
)]
pub async fn add_customer(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CustomerResponse>)> {
    let fields: CustomerFields =
        customer_record(body).map_err(AppError::operation(CREATE_FAILED))?;

    let customer = state
        .customers()
        .create(fields)
        .await
        .map_err(AppError::operation(CREATE_FAILED))?;

    Ok((
        StatusCode::CREATED,
        CustomerResponse::json("Customer added successfully", customer),
    ))
}

/// Add multiple customers
///
/// Create multiple customer records at once. The batch is stored all or
/// nothing: if any record is rejected, none are kept.
///
/// # Errors
///
/// Returns 400 if the body is not an array, 500 if any record is rejected.
#[utoipa::path(
    post,
    path = "/api/customers/list",
    tag = "Customers",
    request_body = Vec<CustomerFields>,
    responses(
        (status = 201, description = "Customers created successfully", body = CustomersResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse),
    )
)]
pub async fn add_customers(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CustomersResponse>)> {
    // Extractor rejections get the same 400 as a non-array body
    let Ok(Json(Value::Array(elements))) = body else {
        return Err(AppError::BadRequest(INVALID_BULK_INPUT.to_string()));
    };

    let batch = elements
        .into_iter()
        .map(customer_record::<CustomerFields>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(AppError::operation(BULK_CREATE_FAILED))?;

    let customers = state
        .customers()
        .create_many(batch)
        .await
        .map_err(AppError::operation(BULK_CREATE_FAILED))?;

    Ok((
        StatusCode::CREATED,
        Json(CustomersResponse {
            message: "Customers added successfully!".to_string(),
            customers,
        }),
    ))
}

/// Update a customer
///
/// Update an existing customer's information. Only the supplied fields
/// change; the rest keep their stored values.
///
/// # Errors
///
/// Returns 404 for an unknown id, 500 for a malformed id, a rejected field,
/// or a store failure.
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "The customer ID")),
    request_body = CustomerPatch,
    responses(
        (status = 200, description = "Customer updated successfully", body = CustomerResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse),
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<CustomerResponse>> {
    let id = CustomerId::parse(&id).map_err(AppError::operation(UPDATE_FAILED))?;
    let patch: CustomerPatch =
        customer_record(body).map_err(AppError::operation(UPDATE_FAILED))?;

    let customer = state
        .customers()
        .update(id, patch)
        .await
        .map_err(AppError::operation(UPDATE_FAILED))?
        .ok_or(AppError::NotFound)?;

    Ok(CustomerResponse::json("Customer updated successfully", customer))
}

/// Delete a customer
///
/// Remove a customer from the database. The response carries the record as
/// it was before deletion.
///
/// # Errors
///
/// Returns 404 for an unknown id, 500 for a malformed id or a store failure.
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "The customer ID")),
    responses(
        (status = 200, description = "Customer deleted successfully", body = CustomerResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse),
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerResponse>> {
    let id = CustomerId::parse(&id).map_err(AppError::operation(DELETE_FAILED))?;

    let customer = state
        .customers()
        .delete(id)
        .await
        .map_err(AppError::operation(DELETE_FAILED))?
        .ok_or(AppError::NotFound)?;

    Ok(CustomerResponse::json("Customer deleted successfully", customer))
}
