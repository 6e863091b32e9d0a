// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::services::contact_service::ContactError;
use crate::services::user_service::UserError;

/// HTTP API error with appropriate status codes and client-facing messages.
///
/// Validation failures, uniqueness conflicts, and bad credentials all
/// surface as 400s — that is the wire contract this API serves, even though
/// conflicts keep their own variant here.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(String),
    Conflict(String),
    AuthFailed(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::AuthFailed(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        ApiError::AuthFailed(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert domain error types to ApiError
impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidEmail => ApiError::validation_error(err.to_string()),
            UserError::EmailTaken => ApiError::conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::auth_failed(err.to_string()),
            UserError::Auth(e) => {
                tracing::error!("credential error: {}", e);
                ApiError::internal_server_error("Erro ao processar requisição")
            }
            UserError::Database(e) => {
                // Log the real error but never leak SQL detail to clients
                tracing::error!("database error registering/authenticating user: {}", e);
                ApiError::internal_server_error("Erro ao processar requisição")
            }
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::InvalidCpf | ContactError::InvalidEmail => {
                ApiError::validation_error(err.to_string())
            }
            ContactError::CpfTaken | ContactError::PhoneTaken | ContactError::EmailTaken => {
                ApiError::conflict(err.to_string())
            }
            ContactError::Database(e) => {
                tracing::error!("database error saving contact: {}", e);
                ApiError::internal_server_error("Erro ao salvar contato")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
