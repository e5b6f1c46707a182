use axum::Router;
use domain_articles::{ArticleUseCase, PgArticleRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgArticleRepository::new(state.read_db.clone(), state.write_db.clone());
    let usecase = ArticleUseCase::new(repository);
    handlers::router(usecase)
}
