//! Articles Domain
//!
//! A CRUD-style domain for articles, split into clean-architecture layers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, binding, validation, envelopes
//! └──────┬──────┘
//!        │ ResultChannel
//! ┌──────▼──────┐
//! │   Usecase   │  ← Composition of repository calls
//! └──────┬──────┘
//!        │ ResultChannel
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Article, inputs, query parameters
//! └─────────────┘
//! ```
//!
//! Every repository and usecase call runs on its own task and hands back a
//! [`result_channel::ResultChannel`]; a panic inside one becomes an
//! [`ArticleError::Fault`] for the layer above.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_articles::{handlers, ArticleUseCase, InMemoryArticleRepository};
//!
//! # async fn example() {
//! let usecase = ArticleUseCase::new(InMemoryArticleRepository::new());
//! let router = axum::Router::new().nest(handlers::BASE_PATH, handlers::router(usecase));
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod usecase;

pub use error::{ArticleError, ArticleResult};
pub use models::{
    Article, ArticleInput, ArticlePage, ArticleQuery, OrderBy, QueryParams, SaveArticle,
    SortDirection,
};
pub use postgres::PgArticleRepository;
pub use repository::{ArticleRepository, InMemoryArticleRepository};
pub use usecase::ArticleUseCase;
