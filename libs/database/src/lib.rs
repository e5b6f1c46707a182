//! PostgreSQL connectivity for the articles service.
//!
//! The service talks to two pools, one for reads and one for writes, each
//! described by its own [`postgres::PostgresConfig`].
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - `PostgresConfig::from_env_prefixed` via `core_config`
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let write = PostgresConfig::from_env_prefixed("POSTGRES_DB_WRITE")?;
//! let db = postgres::connect_from_config_with_retry("write", write, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "articles_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
