//! # Axum Helpers
//!
//! Shared plumbing for the HTTP services.
//!
//! - **[`responses`]**: the `{ error?, data?, success }` envelope
//! - **[`errors`]**: envelope error codes and the 404 fallback
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown
//! - **[`http`]**: CORS configuration

pub mod errors;
pub mod http;
pub mod responses;
pub mod server;

pub use errors::ErrorCode;
pub use responses::{ApiResponse, ErrorEnvelope, error_response};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};
