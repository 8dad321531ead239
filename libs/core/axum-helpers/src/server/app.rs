use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::cors_layer_from_env;
use axum::{Json, Router, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Combine domain routers with the cross-cutting layers.
///
/// - `GET /api-docs/openapi.json` serving `T`'s document
/// - request tracing
/// - CORS from `CORS_ALLOWED_ORIGIN` (see [`cors_layer_from_env`])
/// - the envelope 404 fallback
///
/// `apis` is merged at the root and should already have its state applied.
///
/// # Errors
/// Fails when `CORS_ALLOWED_ORIGIN` is set to something unusable.
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = cors_layer_from_env()?;
    let openapi = T::openapi();

    let router = Router::new()
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// In-flight requests drain first. `cleanup` (closing the pool, etc.) is
/// bounded by `server_config.shutdown_timeout`.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!(address = %listener.local_addr()?, "Server listening");

    let coordinator = ShutdownCoordinator::new();
    let mut shutdown_rx = coordinator.subscribe();
    let signal_task = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.wait_for_signal().await }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server error"));

    signal_task.abort();

    let timeout = server_config.shutdown_timeout;
    info!(?timeout, "Running shutdown cleanup");
    match tokio::time::timeout(timeout, cleanup).await {
        Ok(()) => info!("Cleanup complete"),
        Err(_) => warn!(?timeout, "Cleanup timed out, exiting anyway"),
    }

    serve_result
}
