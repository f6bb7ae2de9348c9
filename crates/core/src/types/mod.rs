//! Core types for the Customer API.
//!
//! This module provides type-safe wrappers for the customer domain.

pub mod customer;
pub mod email;
pub mod id;

pub use customer::{Customer, CustomerError, CustomerFields, CustomerPatch, NewCustomer};
pub use email::{Email, EmailError};
pub use id::{CustomerId, CustomerIdError};
