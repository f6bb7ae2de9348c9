//! Customer API Core - Shared domain types.
//!
//! This crate provides the types used across all Customer API components:
//! - `server` - The HTTP service exposing `/api/customers`
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. Database and `OpenAPI` integrations are behind the
//! `postgres` and `openapi` features.
//!
//! # Modules
//!
//! - [`types`] - Customer record, its identifier, email, and request payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
