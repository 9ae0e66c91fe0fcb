//! HTTP error mapping.
//!
//! Every failure a request can hit collapses into one of five kinds:
//!
//! | Kind                        | Status | Code                    |
//! |-----------------------------|--------|-------------------------|
//! | `InvalidInput`              | 400    | `INVALID_INPUT`         |
//! | `NotFound`                  | 404    | `NOT_FOUND`             |
//! | `InsufficientStock`         | 409    | `INSUFFICIENT_STOCK`    |
//! | `StorageFailure`            | 500    | `STORAGE_FAILURE`       |
//! | `DocumentGenerationFailure` | 500    | `DOCUMENT_FAILURE`      |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use hz_core::{CoreError, ValidationError};
use hz_db::DbError;
use hz_render::RenderError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Document generation failed: {0}")]
    DocumentGenerationFailure(String),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            message: message.into(),
            field: None,
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code, field, available) = match &self {
            AppError::InvalidInput { field, .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", field.clone(), None)
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", None, None),
            AppError::InsufficientStock { available, .. } => (
                StatusCode::CONFLICT,
                "INSUFFICIENT_STOCK",
                None,
                Some(*available),
            ),
            AppError::StorageFailure(_) => {
                tracing::error!(error = %message, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILURE", None, None)
            }
            AppError::DocumentGenerationFailure(_) => {
                tracing::error!(error = %message, "Document generation failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "DOCUMENT_FAILURE", None, None)
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code,
                message,
                field,
                available,
            },
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput {
            message: err.to_string(),
            field: Some(err.field().to_string()),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::NotFound(format!("Product {id}")),
            CoreError::SaleNotFound(id) => AppError::NotFound(format!("Sale {id}")),
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } => AppError::InsufficientStock {
                available,
                requested,
            },
            CoreError::Validation(err) => err.into(),
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::NotFound(format!("{entity} {id}")),
            other => AppError::StorageFailure(other.to_string()),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::DocumentGenerationFailure(err.to_string())
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;
