//! HTTP error mapping
//!
//! Every failure leaves the service as a JSON body
//! `{"error": {"code": ..., "message": ...}}` with a status derived from the
//! error kind.

use arman_common::Error;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed JSON body (400)
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// Malformed query string (400)
    #[error(transparent)]
    Query(#[from] QueryRejection),

    /// Path segment that does not parse, e.g. a non-numeric id (400)
    #[error(transparent)]
    Path(#[from] PathRejection),

    /// Error raised by a service
    #[error(transparent)]
    Common(#[from] Error),
}

/// Status and machine-readable code for a service error
fn classify(err: &Error) -> (StatusCode, &'static str) {
    match err {
        Error::InvalidResource(_) => (StatusCode::BAD_REQUEST, "INVALID_RESOURCE"),
        Error::InvalidOperation => (StatusCode::BAD_REQUEST, "INVALID_OPERATION"),
        Error::OperationMismatch { .. } => (StatusCode::BAD_REQUEST, "OPERATION_MISMATCH"),
        Error::InvalidBiographyVariant(_) => {
            (StatusCode::BAD_REQUEST, "INVALID_BIOGRAPHY_VARIANT")
        }
        Error::ResourceNotFound => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
        Error::ComposerProtected => (StatusCode::CONFLICT, "COMPOSER_PROTECTED"),
        Error::PieceProtected => (StatusCode::CONFLICT, "PIECE_PROTECTED"),
        Error::VenueProtected => (StatusCode::CONFLICT, "VENUE_PROTECTED"),
        Error::ProgrammeProtected => (StatusCode::CONFLICT, "PROGRAMME_PROTECTED"),
        Error::EventProtected => (StatusCode::CONFLICT, "EVENT_PROTECTED"),
        Error::ProgrammeImmutable => (StatusCode::CONFLICT, "PROGRAMME_IMMUTABLE"),
        Error::EventImmutable => (StatusCode::CONFLICT, "EVENT_IMMUTABLE"),
        Error::EventNotPublishable(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "EVENT_NOT_PUBLISHABLE")
        }
        Error::ProgrammeHasNoPieces => {
            (StatusCode::UNPROCESSABLE_ENTITY, "PROGRAMME_HAS_NO_PIECES")
        }
        Error::InvariantViolation(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INVARIANT_VIOLATION")
        }
        Error::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        Error::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            ApiError::Json(_) | ApiError::Query(_) | ApiError::Path(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST")
            }
            ApiError::Common(err) => classify(err),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
