use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use notify_auth::AuthzError;
use notify_core::{DomainError, FieldErrors};
use notify_infra::StoreError;

/// Error surfaced to API callers.
///
/// Store "absent" results are not errors at the store layer; handlers decide
/// whether absence means `NotFound` or `Forbidden`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("forbidden")]
    Forbidden,

    #[error("{message}")]
    Validation { message: String, fields: FieldErrors },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// A request body that could not be decoded at all.
    pub fn undecodable(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields: FieldErrors::new(),
        }
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Unauthorized(_) => Self::Unauthorized(err.to_string()),
            AuthzError::Forbidden => Self::Forbidden,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(fields) => Self::Validation {
                message: "invalid input".to_string(),
                fields,
            },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(msg) => json_error(StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden"),
            ApiError::Validation { message, fields } if fields.is_empty() => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", message)
            }
            ApiError::Validation { message, fields } => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({
                    "error": "validation_error",
                    "message": message,
                    "fields": fields,
                })),
            )
                .into_response(),
            ApiError::NotFound(what) => {
                json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error",
                )
            }
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
