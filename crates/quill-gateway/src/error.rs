use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quill_service::{FieldViolation, ServiceError};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error surface of the JSON API, mapped onto HTTP status codes.
pub enum ApiError {
    /// 400 with a field-keyed detail body.
    Validation(Vec<FieldViolation>),
    /// 404 with a detail message.
    NotFound(String),
    /// 500; the underlying fault is logged, never leaked to the client.
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(violations) => Self::Validation(violations),
            not_found @ (ServiceError::PostNotFound(_)
            | ServiceError::CommentNotFound { .. }) => Self::NotFound(not_found.to_string()),
            ServiceError::Storage(fault) => Self::Internal(fault.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(violations) => {
                let mut fields: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
                for violation in &violations {
                    fields.entry(violation.field).or_default().push(violation.message);
                }
                (StatusCode::BAD_REQUEST, Json(fields)).into_response()
            }
            ApiError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Internal(fault) => {
                error!(fault = %fault, "storage fault while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
