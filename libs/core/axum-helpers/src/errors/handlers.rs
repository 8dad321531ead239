use axum::response::Response;

use super::ErrorCode;
use crate::responses::error_response;

/// Router fallback for unmatched paths.
pub async fn not_found() -> Response {
    error_response(ErrorCode::NotFound)
}
