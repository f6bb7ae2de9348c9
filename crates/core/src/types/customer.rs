//! The customer record and its request payloads.
//!
//! Three shapes travel through the system:
//!
//! - [`CustomerFields`] / [`CustomerPatch`] - what a client sent, unvalidated
//! - [`NewCustomer`] - a create payload that passed validation
//! - [`Customer`] - a persisted record with its store-assigned id

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::email::{Email, EmailError};
use super::id::CustomerId;

/// Validation failures for customer payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CustomerError {
    /// A required field was not supplied.
    #[error("path '{0}' is required")]
    MissingField(&'static str),
    /// A field was supplied but empty.
    #[error("path '{0}' cannot be empty")]
    EmptyField(&'static str),
    /// The email field failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    /// A batch element could not be read as a customer record.
    #[error("invalid customer record: {0}")]
    InvalidRecord(String),
}

/// A persisted customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(
    feature = "openapi",
    schema(example = json!({
        "id": "60d21b49-67d0-4899-8e61-0c8500000000",
        "name": "Alice Guo",
        "email": "alice.guo@sample.com",
        "phone": "0912-345-6789",
        "address": "123 United Squaters Area"
    }))
)]
pub struct Customer {
    /// Store-assigned identifier.
    pub id: CustomerId,
    /// The customer name.
    pub name: String,
    /// The customer email (unique across all customers).
    pub email: Email,
    /// The customer phone number.
    pub phone: String,
    /// The customer address.
    pub address: String,
}

/// Customer fields as received from a client.
///
/// Every field is optional here so that an incomplete body reaches
/// [`CustomerFields::validate`] instead of being rejected during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(
    feature = "openapi",
    schema(example = json!({
        "name": "Bini Manoy",
        "email": "manoy@bini.com",
        "phone": "555-888-7000",
        "address": "123 Main St, Anytown, USA"
    }))
)]
pub struct CustomerFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CustomerFields {
    /// Check that all four fields are present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns the first missing or empty field, in schema order.
    pub fn validate(self) -> Result<NewCustomer, CustomerError> {
        let name = required("name", self.name)?;
        let email = Email::parse(&self.email.ok_or(CustomerError::MissingField("email"))?)?;
        let phone = required("phone", self.phone)?;
        let address = required("address", self.address)?;

        Ok(NewCustomer {
            name,
            email,
            phone,
            address,
        })
    }
}

/// A create payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
}

impl NewCustomer {
    /// Attach a store-assigned id, producing the persisted shape.
    #[must_use]
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
        }
    }
}

/// A partial update. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(
    feature = "openapi",
    schema(example = json!({
        "name": "John Updated",
        "email": "john.updated@example.com"
    }))
)]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CustomerPatch {
    /// Reject supplied fields that are empty.
    ///
    /// # Errors
    ///
    /// Returns the first supplied field that violates the schema.
    pub fn validate(&self) -> Result<(), CustomerError> {
        non_empty("name", self.name.as_deref())?;
        if let Some(email) = &self.email {
            Email::parse(email)?;
        }
        non_empty("phone", self.phone.as_deref())?;
        non_empty("address", self.address.as_deref())?;
        Ok(())
    }

    /// Returns true if no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }

    /// Merge the supplied fields onto an existing record.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch does not validate.
    pub fn apply(self, customer: &mut Customer) -> Result<(), CustomerError> {
        self.validate()?;
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = Email::parse(&email)?;
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
        if let Some(address) = self.address {
            customer.address = address;
        }
        Ok(())
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, CustomerError> {
    let value = value.ok_or(CustomerError::MissingField(field))?;
    non_empty(field, Some(&value))?;
    Ok(value)
}

fn non_empty(field: &'static str, value: Option<&str>) -> Result<(), CustomerError> {
    match value {
        Some("") => Err(CustomerError::EmptyField(field)),
        _ => Ok(()),
    }
}
