//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. Store failures are captured to
//! Sentry and answered with a 500 that embeds the failure detail; a missing
//! record is an ordinary 404 and is not reported.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::RepositoryError;

/// Message returned for every unknown customer id.
pub const NOT_FOUND_MESSAGE: &str = "Customer not found";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// An accessor call failed. `message` names the operation.
    #[error("{message}: {source}")]
    Operation {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },

    /// No customer has the requested id.
    #[error("Not found")]
    NotFound,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Build a closure that wraps a store failure with an operation message.
    ///
    /// Meant for `map_err`:
    ///
    /// ```rust,ignore
    /// store.list().await.map_err(AppError::operation("Error fetching customers"))?;
    /// ```
    pub fn operation<E>(message: &'static str) -> impl FnOnce(E) -> Self
    where
        E: Into<RepositoryError>,
    {
        move |source| Self::Operation {
            message,
            source: source.into(),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable summary.
    #[schema(example = "Error fetching customer")]
    pub message: String,
    /// Failure detail; present on 500 responses only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// The underlying failure behind a 500 response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Failure class: `database`, `conflict`, `validation` or `invalid_id`.
    #[schema(example = "conflict")]
    pub kind: String,
    /// The store's own description of the failure.
    #[schema(example = "constraint violation: email already exists")]
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Operation { message, source } => {
                let event_id = sentry::capture_error(&source);
                tracing::error!(
                    error = %source,
                    kind = source.kind(),
                    sentry_event_id = %event_id,
                    "{message}"
                );

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: message.to_string(),
                        error: Some(ErrorDetail {
                            kind: source.kind().to_string(),
                            detail: source.to_string(),
                        }),
                    },
                )
            }
            Self::NotFound => {
                tracing::debug!("{NOT_FOUND_MESSAGE}");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        message: NOT_FOUND_MESSAGE.to_string(),
                        error: None,
                    },
                )
            }
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message,
                    error: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use customers_core::CustomerError;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");

        let err = AppError::operation("Error adding customer")(RepositoryError::Conflict(
            "email already exists".to_owned(),
        ));
        assert_eq!(
            err.to_string(),
            "Error adding customer: constraint violation: email already exists"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(get_status(AppError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::operation("Error fetching customers")(
                RepositoryError::Database(sqlx::Error::PoolTimedOut)
            )),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_operation_error_body_embeds_detail() {
        let err =
            AppError::operation("Error adding customer")(CustomerError::MissingField("email"));
        let json = body_json(err.into_response()).await;

        assert_eq!(json["message"], "Error adding customer");
        assert_eq!(json["error"]["kind"], "validation");
        assert_eq!(
            json["error"]["detail"],
            "validation failed: path 'email' is required"
        );
    }

    #[tokio::test]
    async fn test_not_found_body_has_message_only() {
        let json = body_json(AppError::NotFound.into_response()).await;
        assert_eq!(json["message"], "Customer not found");
        assert!(json.get("error").is_none());
    }
}
