//! Error taxonomy of the HTTP layer.
//!
//! Every handler returns `Result<HttpResponse, ApiError>`; the conversion to a
//! status code and a `{"status": .., "detail": ..}` body happens here, once.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

/// Postgres SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request body that deserialized but failed validation.
    #[error("{0}")]
    BadRequest(String),
    /// A unique key (team name, username, email) is already taken.
    #[error("{0}")]
    ValidationConflict(String),
    /// The request points at a row that does not exist (e.g. a player's team).
    #[error("{0}")]
    InvalidReference(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Forbidden(String),
    /// The row cannot be removed while other rows depend on it.
    #[error("{0}")]
    InUse(String),
    #[error("Database error")]
    Database(#[source] sqlx::Error),
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Translate constraint violations into client errors, everything else
    /// stays a database error.
    pub fn from_db(e: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return ApiError::ValidationConflict(conflict_message.to_string())
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return ApiError::InvalidReference("Referenced record does not exist".to_string())
                }
                _ => {}
            }
        }
        ApiError::Database(e)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::ValidationConflict(_)
            | ApiError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InUse(_) => StatusCode::CONFLICT,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Database(e) => tracing::error!("Database error: {:?}", e),
            ApiError::Internal(e) => tracing::error!("Internal error: {}", e),
            _ => {}
        }

        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if let ApiError::Unauthenticated(_) = self {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(json!({
            "status": status.as_u16(),
            "detail": self.to_string()
        }))
    }
}
