//! Readiness handler with real database checks.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

/// Readiness check: pings the read and write pools concurrently.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let read: HealthCheckFuture<'_> = Box::pin(async {
        check_health(&state.read_db)
            .await
            .map_err(|e| format!("Read database ping failed: {}", e))
    });
    let write: HealthCheckFuture<'_> = Box::pin(async {
        check_health(&state.write_db)
            .await
            .map_err(|e| format!("Write database ping failed: {}", e))
    });

    let checks = vec![("read_database", read), ("write_database", write)];

    run_health_checks(checks).await.into_response()
}
