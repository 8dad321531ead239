use axum::Router;

pub mod health;
pub mod users;

/// Creates the API routes. Every sub-router already has its state applied.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().merge(users::router(state))
}

/// Creates a router with the /ready endpoint that checks the database.
///
/// Merged next to the stateless router returned by `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
