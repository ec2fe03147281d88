//! Error Response Catalog
//!
//! Every failure path in the service resolves to exactly one entry of the
//! fixed catalog below, serialized as `{"message": ..., "code": ...}` with
//! the status code the data exchange protocol mandates. The one sanctioned
//! exception is the OAuth2 token endpoint, which answers bad credentials
//! with the `{"error", "error_description"}` pair from RFC 6749.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type; each variant is one catalog entry.
#[derive(Error, Debug)]
pub enum AppError {
    /// Credentials are missing, malformed, or insufficient (403).
    #[error("Access denied")]
    AccessDenied,

    /// The request itself is malformed (400).
    #[error("Bad Request")]
    BadRequest,

    /// The requested footprint does not exist (404).
    #[error("No such footprint")]
    NoSuchFootprint,

    /// The requested action is deliberately not implemented (400).
    #[error("Not implemented")]
    NotImplemented,

    /// The presented access token was valid but has expired (401).
    #[error("Token expired")]
    TokenExpired,

    /// A uniqueness constraint was violated (409); carries the detail
    /// message shown to the client.
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Request body or query parameters failed validation (422).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database-level failures (500, detail never leaves the server).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failures (500, detail never leaves the server).
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Catch-all internal error (500, detail never leaves the server).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The fixed wire shape for error responses.
#[derive(Serialize, Debug, PartialEq)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
}

impl ErrorBody {
    pub fn new(message: &str, code: &str) -> Self {
        Self {
            message: message.to_string(),
            code: code.to_string(),
        }
    }
}

impl AppError {
    /// The catalog row for this error: (status, message, code).
    pub fn catalog_entry(&self) -> (StatusCode, String, &'static str) {
        match self {
            AppError::AccessDenied => (
                StatusCode::FORBIDDEN,
                "Access denied".to_string(),
                "AccessDenied",
            ),
            AppError::BadRequest => (
                StatusCode::BAD_REQUEST,
                "Bad Request".to_string(),
                "BadRequest",
            ),
            AppError::NoSuchFootprint => (
                StatusCode::NOT_FOUND,
                "The specified footprint does not exist".to_string(),
                "NoSuchFootprint",
            ),
            AppError::NotImplemented => (
                StatusCode::BAD_REQUEST,
                "The specified Action or header you provided implies functionality that is not implemented".to_string(),
                "NotImplemented",
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "The specified access token has expired".to_string(),
                "TokenExpired",
            ),
            AppError::DuplicateEntry(detail) => {
                (StatusCode::CONFLICT, detail.clone(), "DuplicateEntry")
            }
            AppError::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                detail.clone(),
                "ValidationError",
            ),
            AppError::Database(_) | AppError::Hashing(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal or unexpected error has occurred".to_string(),
                "InternalError",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Database(_) | AppError::Hashing(_) | AppError::Internal(_) = &self {
            log::error!("internal error: {}", self);
        }

        let (status, message, code) = self.catalog_entry();
        (status, Json(ErrorBody::new(&message, code))).into_response()
    }
}

/// Result type alias for operations that can return AppError
pub type AppResult<T> = Result<T, AppError>;

/// The OAuth2 error envelope used exclusively by the token endpoint.
#[derive(Serialize, Debug)]
pub struct OAuth2Error {
    pub error: String,
    pub error_description: String,
}

impl OAuth2Error {
    pub fn invalid_client() -> Self {
        Self {
            error: "invalid_client".to_string(),
            error_description: "Client authentication failed".to_string(),
        }
    }
}

impl IntoResponse for OAuth2Error {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}
