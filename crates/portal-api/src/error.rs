//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portal_core::DomainError;
use portal_shared::MenuItemId;
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid entries: {message}")]
    InvalidEntries { message: String, invalid: Vec<MenuItemId> },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::RoleNotFound(_) => ApiError::NotFound(e.to_string()),
            DomainError::RoleNameAlreadyExists(_) => ApiError::Conflict(e.to_string()),
            DomainError::InvalidMenuItems(ref ids) => ApiError::InvalidEntries {
                message: e.to_string(),
                invalid: ids.clone(),
            },
            DomainError::ValidationError(msg) => ApiError::BadRequest(msg),
            DomainError::Unavailable(msg) | DomainError::CacheInvalidationFailed(msg) => {
                ApiError::Unavailable(msg)
            }
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            DomainError::InvalidCatalog(msg) | DomainError::InternalError(msg) => {
                ApiError::InternalError(msg)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, invalid) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "CONFLICT", msg, None)
            }
            ApiError::InvalidEntries { message, invalid } => {
                tracing::warn!("Rejected batch: {}", message);
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message, Some(invalid))
            }
            ApiError::Unavailable(msg) => {
                tracing::error!("Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UNAVAILABLE",
                    "Service temporarily unavailable".to_string(),
                    None,
                )
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Request failed".to_string(), None)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Request failed".to_string(), None)
            }
        };

        let body = Json(ApiResponse::<()>::error_with_invalid(code, &message, invalid));
        (status, body).into_response()
    }
}
