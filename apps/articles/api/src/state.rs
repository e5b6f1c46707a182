//! Application state management.
//!
//! Both pools are created once at startup and shared by every handler;
//! cloning only copies pool handles.

use database::postgres::DatabaseConnection;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Pool for SELECTs
    pub read_db: DatabaseConnection,
    /// Pool for transactional writes
    pub write_db: DatabaseConnection,
}
