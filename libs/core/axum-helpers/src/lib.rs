//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service binaries.
//!
//! ## Modules
//!
//! - **[`response`]**: the response envelope, pagination meta, JSON/XML rendering
//! - **[`errors`]**: the per-request error collector and fallback handlers
//! - **[`extractors`]**: validated JSON/query and numeric path extractors
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (security headers)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{HttpResponse, Meta, ResponseFormat};
//! use axum::http::StatusCode;
//!
//! async fn list(format: ResponseFormat) -> axum::response::Response {
//!     HttpResponse::new(StatusCode::OK, "Article List")
//!         .with_data(&items)
//!         .with_meta(Meta::new(total, page, limit))
//!         .render(format)
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

pub use errors::MultiError;
pub use extractors::{NumericPath, ValidatedJson, ValidatedQuery};
pub use http::security_headers;
pub use response::{DATA_NOT_FOUND, HttpResponse, Meta, ResponseFormat, ResponseParam};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};
