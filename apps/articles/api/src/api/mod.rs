use axum::Router;

pub mod articles;
pub mod health;

/// Creates the API routes.
///
/// Takes a reference to AppState and wires each domain to its pools.
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest(domain_articles::handlers::BASE_PATH, articles::router(state))
}

/// Creates a router with the /ready endpoint that pings both pools.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
