use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use axum_helpers::{ApiResponse, ErrorEnvelope};
use serde::Deserialize;
#[allow(unused_imports)]
use serde_json::json;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, EditUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(create_user, edit_user, get_user_by_email),
    components(schemas(UserResponse, CreateUser, EditUser, axum_helpers::ErrorCode)),
    tags((name = TAG, description = "User directory endpoints"))
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users", get(get_user_by_email))
        .route("/users/new", post(create_user))
        .route("/users/edits/{user_id}", post(edit_user))
        .with_state(shared_service)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmailQuery {
    /// Exact email to look up
    pub email: Option<String>,
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users/new",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Missing field or unreadable body", body = ErrorEnvelope,
            example = json!({"error": "ValidationError", "success": false})),
        (status = 409, description = "User name or email already used", body = ErrorEnvelope,
            example = json!({"error": "UsernameAlreadyTaken", "success": false})),
        (status = 500, description = "Server error", body = ErrorEnvelope,
            example = json!({"error": "ServerError", "success": false}))
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> UserResult<Response> {
    let Json(input) = payload?;
    let user = service.create_user(input).await?;
    Ok(ApiResponse::with_status(user, StatusCode::CREATED))
}

/// Replace a user's fields
#[utoipa::path(
    post,
    path = "/users/edits/{user_id}",
    tag = TAG,
    params(("user_id" = i32, Path, description = "User id")),
    request_body = EditUser,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "Missing field or unreadable body", body = ErrorEnvelope,
            example = json!({"error": "ValidationError", "success": false})),
        (status = 404, description = "No such user", body = ErrorEnvelope,
            example = json!({"error": "UserNotFound", "success": false})),
        (status = 409, description = "User name or email held by another user", body = ErrorEnvelope,
            example = json!({"error": "EmailAlreadyInUse", "success": false})),
        (status = 500, description = "Server error", body = ErrorEnvelope,
            example = json!({"error": "ServerError", "success": false}))
    )
)]
async fn edit_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    user_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<EditUser>, JsonRejection>,
) -> UserResult<Response> {
    // An id that is not an integer cannot name a user
    let Path(user_id) = user_id.map_err(|e| UserError::NotFound(e.body_text()))?;
    let Json(input) = payload?;

    let user = service.update_user(user_id, input).await?;
    Ok(ApiResponse::with_status(user, StatusCode::OK))
}

/// Look a user up by email
#[utoipa::path(
    get,
    path = "/users",
    tag = TAG,
    params(EmailQuery),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponse>),
        (status = 404, description = "No user has this email", body = ErrorEnvelope,
            example = json!({"error": "UserNotFound", "success": false})),
        (status = 500, description = "Server error", body = ErrorEnvelope,
            example = json!({"error": "ServerError", "success": false}))
    )
)]
async fn get_user_by_email<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> UserResult<Response> {
    let Query(query) = query?;
    let email = query.email.unwrap_or_default();

    let user = service.get_user_by_email(&email).await?;
    Ok(ApiResponse::with_status(user, StatusCode::OK))
}
