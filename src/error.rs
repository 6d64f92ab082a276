//! Application error taxonomy and HTTP mapping.
//!
//! Every fallible operation in the service layer returns [`AppError`]. The
//! expected, caller-recoverable conditions (`InvalidUrl`, `SlugConflict`,
//! `SlugExhausted`, `NotFound`) carry enough context to build a useful
//! response; store faults collapse into `Internal` and never leak details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned in JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("Invalid URL format")]
    InvalidUrl { url: String },

    #[error("Slug already in use")]
    SlugConflict { slug: String },

    #[error("Failed to generate unique slug")]
    SlugExhausted { attempts: usize },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for errors that may succeed when retried (store faults).
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Internal { .. })
    }

    fn parts(&self) -> (StatusCode, &'static str, Value) {
        match self {
            AppError::Validation { details, .. } => {
                (StatusCode::BAD_REQUEST, "validation_error", details.clone())
            }
            AppError::Unauthorized { details, .. } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", details.clone())
            }
            AppError::InvalidUrl { url } => {
                (StatusCode::CONFLICT, "invalid_url", json!({ "long_url": url }))
            }
            AppError::SlugConflict { slug } => {
                (StatusCode::CONFLICT, "slug_conflict", json!({ "slug": slug }))
            }
            AppError::SlugExhausted { attempts } => (
                StatusCode::CONFLICT,
                "slug_exhausted",
                json!({ "attempts": attempts }),
            ),
            AppError::NotFound { details, .. } => {
                (StatusCode::NOT_FOUND, "not_found", details.clone())
            }
            // Internal details stay in the logs.
            AppError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", json!({}))
            }
        }
    }

    /// Builds the serializable error payload without consuming the error.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, details) = self.parts();
        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message, details } = &self {
            tracing::error!(%message, %details, "Internal error");
        }

        let (status, _, _) = self.parts();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

/// Translates SQLx errors into the application taxonomy.
///
/// Foreign-key violations become `NotFound` (the referenced link is gone),
/// everything else is internal. Slug uniqueness violations are recognised
/// by the repositories themselves, which know the slug that collided
/// (see [`crate::utils::db_error::is_unique_violation_on_slug`]).
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_foreign_key_violation()
    {
        return AppError::not_found(
            "Referenced link not found",
            json!({ "constraint": db.constraint() }),
        );
    }

    AppError::internal("Database error", json!({ "cause": e.to_string() }))
}
