//! Uniform `{ error?, data?, success }` envelope for every API response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;

use crate::errors::ErrorCode;

/// Response envelope.
///
/// Absent fields are omitted from the JSON rather than sent as `null`:
///
/// ```json
/// { "data": { "id": 1, "email": "a@x.com" }, "success": true }
/// { "error": "UserNotFound", "success": false }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            error: None,
            data: Some(data),
            success: true,
        }
    }

    pub fn failure(code: ErrorCode) -> Self {
        Self {
            error: Some(code),
            data: None,
            success: false,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Serve a successful envelope with the given status.
    pub fn with_status(data: T, status: StatusCode) -> Response {
        (status, Json(Self::success(data))).into_response()
    }
}

/// Failure envelope as documented in OpenAPI responses.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"error": "UserNotFound", "success": false}))]
pub struct ErrorEnvelope {
    pub error: ErrorCode,
    pub success: bool,
}

/// Failure envelope served with the status that belongs to `code`.
pub fn error_response(code: ErrorCode) -> Response {
    (code.status(), Json(ApiResponse::<()>::failure(code))).into_response()
}
