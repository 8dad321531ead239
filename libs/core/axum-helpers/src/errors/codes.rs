//! Closed set of error identifiers carried in the response envelope.
//!
//! Each code has:
//! - the identifier clients see in `error` (e.g. `"UserNotFound"`)
//! - an integer code for structured logs (e.g. `1004`)
//! - the HTTP status it is served with
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//! use axum::http::StatusCode;
//!
//! let code = ErrorCode::EmailAlreadyInUse;
//! assert_eq!(code.as_str(), "EmailAlreadyInUse");
//! assert_eq!(code.code(), 1003);
//! assert_eq!(code.status(), StatusCode::CONFLICT);
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ErrorCode {
    // Client errors (1000s)
    /// A required field is missing
    ValidationError,

    /// Another user already holds the requested user name
    UsernameAlreadyTaken,

    /// Another user already holds the requested email
    EmailAlreadyInUse,

    /// No user matches the given id or email
    UserNotFound,

    /// The request could not be read, e.g. a body that is not JSON
    ClientError,

    /// No route matches the request
    NotFound,

    // Server errors (5000s)
    /// Unexpected failure, typically the datastore
    ServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "ValidationError",
            Self::UsernameAlreadyTaken => "UsernameAlreadyTaken",
            Self::EmailAlreadyInUse => "EmailAlreadyInUse",
            Self::UserNotFound => "UserNotFound",
            Self::ClientError => "ClientError",
            Self::NotFound => "NotFound",
            Self::ServerError => "ServerError",
        }
    }

    /// Integer code for structured logs and metrics.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::UsernameAlreadyTaken => 1002,
            Self::EmailAlreadyInUse => 1003,
            Self::UserNotFound => 1004,
            Self::ClientError => 1005,
            Self::NotFound => 1006,
            Self::ServerError => 5001,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError | Self::ClientError => StatusCode::BAD_REQUEST,
            Self::UsernameAlreadyTaken | Self::EmailAlreadyInUse => StatusCode::CONFLICT,
            Self::UserNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
