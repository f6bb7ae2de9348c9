//! HTTP middleware stack for the customer service.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. CORS
//! 3. `TraceLayer` (the `http_request` span)
//! 4. Request ID (recorded on the span, echoed in the response)

pub mod cors;
pub mod request_id;

pub use cors::build_cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
