//! Unified error handling for the Motorpool services
//!
//! `AppError` is the error type of every repository and service call. Its
//! `IntoResponse` impl is the global error filter: each variant maps to a
//! problem-details response, and server-side faults are logged without
//! leaking their cause to the client.

use crate::problem::ProblemDetails;
use crate::validation::ValidationFailure;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {}", join_failures(.0))]
    Validation(Vec<ValidationFailure>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn join_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Single-field validation failure
    pub fn invalid(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        AppError::Validation(vec![ValidationFailure::new(field, code, message)])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as problem details, logging server-side faults
    pub fn to_problem(&self) -> ProblemDetails {
        match self {
            AppError::NotFound(msg) => ProblemDetails::not_found(msg.clone()),
            AppError::BadRequest(msg) => ProblemDetails::bad_request(msg.clone()),
            AppError::Unauthorized(msg) => {
                ProblemDetails::new(StatusCode::UNAUTHORIZED, "Unauthorized")
                    .with_detail(msg.clone())
            }
            AppError::Forbidden(msg) => {
                ProblemDetails::new(StatusCode::FORBIDDEN, "Forbidden").with_detail(msg.clone())
            }
            AppError::Conflict(msg) => ProblemDetails::conflict(msg.clone()),
            AppError::Validation(failures) => ProblemDetails::validation(failures.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ProblemDetails::internal().with_detail("A database error occurred")
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream service error: {}", msg);
                ProblemDetails::new(StatusCode::BAD_GATEWAY, "Bad Gateway")
                    .with_detail("A dependent service is unavailable")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                ProblemDetails::internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_problem().into_response()
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(ValidationFailure::from_errors(&errors))
    }
}
