use axum_helpers::server::{close_postgres, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // Open both pools concurrently, each retrying while Postgres comes up
    let read_future = async {
        connect_from_config_with_retry("read", config.read_database.clone(), None)
            .await
            .map_err(|e| eyre::eyre!("PostgreSQL read pool connection failed: {}", e))
    };

    let write_future = async {
        connect_from_config_with_retry("write", config.write_database.clone(), None)
            .await
            .map_err(|e| eyre::eyre!("PostgreSQL write pool connection failed: {}", e))
    };

    let (read_db, write_db) = tokio::try_join!(read_future, write_future)?;

    if config.run_migrations {
        run_migrations::<migration::Migrator>(&write_db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    }

    let state = AppState {
        config,
        read_db,
        write_db,
    };

    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes);

    // - /health: liveness check with app name/version
    // - /ready: readiness check pinging both pools
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting articles API with graceful shutdown (30s timeout)");

    let AppState {
        config,
        read_db,
        write_db,
    } = state;

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            tokio::join!(
                close_postgres(read_db, "read"),
                close_postgres(write_db, "write"),
            );
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Articles API shutdown complete");
    Ok(())
}
