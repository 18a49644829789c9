//! Error handling - maps failures to the blog API's response bodies.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use quill_core::DomainError;
use quill_shared::response::INVALID_PAYLOAD_TEXT;
use quill_shared::{ErrorBody, MessageBody, PayloadError};
use std::fmt;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid credential.
    Unauthorized,
    /// Credential is valid but its subject is not an author id.
    InvalidPrincipal(String),
    /// Authenticated caller does not own the target.
    Forbidden(String),
    /// Request body failed schema validation.
    Validation(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::InvalidPrincipal(subject) => write!(f, "Invalid principal: {:?}", subject),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized
            | AppError::InvalidPrincipal(_)
            | AppError::Forbidden(_)
            | AppError::Validation(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());

        match self {
            AppError::Unauthorized => response.json(ErrorBody::unauthorized()),
            AppError::InvalidPrincipal(subject) => {
                tracing::warn!(subject = %subject, "Token subject is not a numeric author id");
                response.json(ErrorBody::invalid_principal())
            }
            AppError::Forbidden(detail) => {
                tracing::warn!("Forbidden: {}", detail);
                response.json(ErrorBody::forbidden())
            }
            // Plain text, kept for existing clients.
            AppError::Validation(detail) => {
                tracing::debug!("Rejected payload: {}", detail);
                response
                    .content_type(ContentType::plaintext())
                    .body(INVALID_PAYLOAD_TEXT)
            }
            AppError::NotFound(detail) => {
                tracing::debug!("Not found: {}", detail);
                response.json(MessageBody::not_found())
            }
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                response.json(MessageBody::internal_error())
            }
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Forbidden { .. } => AppError::Forbidden(err.to_string()),
            DomainError::InvalidPrincipal(subject) => AppError::InvalidPrincipal(subject),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<PayloadError> for AppError {
    fn from(err: PayloadError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
