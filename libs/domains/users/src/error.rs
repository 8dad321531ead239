use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
};
use axum_helpers::{ErrorCode, error_response};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Malformed request: {0}")]
    MalformedBody(String),

    #[error("User name '{0}' is already taken")]
    UsernameAlreadyTaken(String),

    #[error("Email '{0}' is already in use")]
    EmailAlreadyInUse(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::Validation(_) => ErrorCode::ValidationError,
            UserError::MalformedBody(_) => ErrorCode::ClientError,
            UserError::UsernameAlreadyTaken(_) => ErrorCode::UsernameAlreadyTaken,
            UserError::EmailAlreadyInUse(_) => ErrorCode::EmailAlreadyInUse,
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::Internal(_) => ErrorCode::ServerError,
        }
    }
}

impl From<ValidationErrors> for UserError {
    fn from(errors: ValidationErrors) -> Self {
        UserError::Validation(errors.to_string())
    }
}

/// A body sent without a JSON content type carries no fields at all.
impl From<JsonRejection> for UserError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                UserError::Validation(rejection.body_text())
            }
            other => UserError::MalformedBody(other.body_text()),
        }
    }
}

/// A query that cannot be read names no user.
impl From<QueryRejection> for UserError {
    fn from(rejection: QueryRejection) -> Self {
        UserError::NotFound(rejection.body_text())
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let code = self.code();

        match &self {
            UserError::Internal(msg) => {
                tracing::error!(error_code = code.code(), "Internal error: {}", msg);
            }
            UserError::MalformedBody(msg) => {
                tracing::warn!(error_code = code.code(), "Malformed request: {}", msg);
            }
            other => {
                tracing::info!(error_code = code.code(), "{}", other);
            }
        }

        error_response(code)
    }
}
