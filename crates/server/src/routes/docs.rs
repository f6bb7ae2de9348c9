//! Generated API documentation.
//!
//! The `OpenAPI` document is assembled from the `#[utoipa::path]` annotations
//! on the customer handlers, built once at router construction, and served as
//! static JSON next to a Swagger UI page.

use std::sync::Arc;

use axum::{
    Json, Router,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use utoipa::OpenApi;
use utoipa::openapi::server::ServerBuilder;

use customers_core::{Customer, CustomerFields, CustomerPatch};

use super::customers::{self, CustomerResponse, CustomersResponse};
use crate::error::{ErrorDetail, ErrorResponse};
use crate::state::AppState;

/// Path of the Swagger UI page.
pub const DOCS_PATH: &str = "/api-docs";

/// Path of the generated `OpenAPI` document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Customer Management API",
        version = "1.0.0",
        description = "API documentation for the customer management system",
        contact(name = "API Support")
    ),
    paths(
        customers::list_customers,
        customers::get_customer,
        customers::add_customer,
        customers::add_customers,
        customers::update_customer,
        customers::delete_customer,
    ),
    components(schemas(
        Customer,
        CustomerFields,
        CustomerPatch,
        CustomerResponse,
        CustomersResponse,
        ErrorResponse,
        ErrorDetail,
    )),
    tags((name = "Customers", description = "Customer management endpoints"))
)]
pub struct ApiDoc;

/// Build the `OpenAPI` document advertising `base_url` as its server.
#[must_use]
pub fn document(base_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![
        ServerBuilder::new()
            .url(base_url)
            .description(Some("Development server"))
            .build(),
    ]);
    doc
}

/// Build the documentation router.
pub fn router(base_url: &str) -> Router<AppState> {
    let doc = Arc::new(document(base_url));
    tracing::debug!(
        operations = doc.paths.paths.len(),
        "OpenAPI document built"
    );

    Router::new()
        .route(DOCS_PATH, get(swagger_ui))
        .route(
            OPENAPI_PATH,
            get(move || async move {
                ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
            }),
        )
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Customer API Documentation</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  <style>.swagger-ui .topbar { display: none }</style>
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({
        url: "/api-docs/openapi.json",
        dom_id: "#swagger-ui",
      });
    };
  </script>
</body>
</html>
"##;
