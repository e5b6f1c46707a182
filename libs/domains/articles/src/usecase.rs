use result_channel::{ResultChannel, spawn_result};
use std::sync::Arc;
use tracing::error;

use crate::error::ArticleError;
use crate::models::{Article, ArticlePage, ArticleQuery, SaveArticle};
use crate::repository::ArticleRepository;

/// Orchestrates repository calls for the HTTP layer.
///
/// Each method spawns its own operation and awaits the repository's channels
/// inside it, so a failure at either level reaches the caller as one
/// `ArticleError`.
pub struct ArticleUseCase<R: ArticleRepository> {
    repository: Arc<R>,
}

impl<R: ArticleRepository> Clone for ArticleUseCase<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<R: ArticleRepository + 'static> ArticleUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn save(&self, input: SaveArticle) -> ResultChannel<Article, ArticleError> {
        let repository = self.repository.clone();

        spawn_result("article_usecase_save", async move {
            repository.save(input).await.inspect_err(|e| {
                error!(context = "article_usecase_save", scope = "res_repo_save", error = %e, "save failed");
            })
        })
    }

    pub fn get_by_id(&self, id: i32) -> ResultChannel<Article, ArticleError> {
        let repository = self.repository.clone();

        spawn_result("article_usecase_get_by_id", async move {
            repository.get_by_id(id).await.inspect_err(|e| {
                if !e.is_not_found() {
                    error!(context = "article_usecase_get_by_id", scope = "res_repo_get_by_id", error = %e, "lookup failed");
                }
            })
        })
    }

    /// Page and total are requested together; the page is awaited first.
    pub fn get_all(&self, query: ArticleQuery) -> ResultChannel<ArticlePage, ArticleError> {
        let repository = self.repository.clone();

        spawn_result("article_usecase_get_all", async move {
            let data = repository.get_all(&query);
            let total = repository.get_total(&query);

            let data = data.await.inspect_err(|e| {
                error!(context = "article_usecase_get_all", scope = "res_repo_get_all", error = %e, "listing failed");
            })?;
            let total = total.await.inspect_err(|e| {
                error!(context = "article_usecase_get_all", scope = "res_repo_get_total", error = %e, "count failed");
            })?;

            Ok(ArticlePage { data, total })
        })
    }
}
