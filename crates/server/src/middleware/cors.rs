//! Cross-origin resource sharing for browser clients.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Methods the customer API answers to.
const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build a CORS layer from the configured origins.
///
/// An origin list containing `*` allows any origin. Entries that are not
/// valid header values are skipped with a warning.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(origins))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return AllowOrigin::from(Any);
    }

    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(values)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt as _;

    use super::*;

    fn app(origins: &[&str]) -> Router {
        let origins: Vec<String> = origins.iter().map(|s| (*s).to_owned()).collect();
        Router::new()
            .route("/api/customers", get(|| async { "[]" }))
            .layer(build_cors_layer(&origins))
    }

    async fn preflight(app: Router, origin: &str) -> axum::response::Response {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/customers")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let response = preflight(app(&["*"]), "https://anywhere.test").await;
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        let methods = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("PUT"));
        assert!(methods.contains("DELETE"));
    }

    #[tokio::test]
    async fn test_explicit_origin_list() {
        let app = app(&["https://admin.example.com"]);

        let allowed = preflight(app.clone(), "https://admin.example.com").await;
        assert_eq!(
            allowed
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "https://admin.example.com"
        );

        let denied = preflight(app, "https://evil.test").await;
        assert!(
            denied
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
