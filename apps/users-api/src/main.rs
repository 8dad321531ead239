use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation, so startup errors are rendered with span traces
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        "Starting users API"
    );

    let db = connect_from_config_with_retry(config.database.clone(), Some(config.retry.clone()))
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        run_migrations::<migration::Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;
    } else {
        info!("RUN_MIGRATIONS=false, skipping migrations");
    }

    let state = AppState { config, db };

    // - /users...: the API
    // - /health: liveness with app name/version
    // - /ready: readiness with a real database probe
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state))?;
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    let server = state.config.server.clone();
    create_production_app(app, &server, async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(()) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
