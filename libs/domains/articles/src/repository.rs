use chrono::{SecondsFormat, Utc};
use result_channel::{ResultChannel, spawn_result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ArticleError;
use crate::models::{Article, ArticleQuery, OrderBy, SaveArticle, SortDirection};

/// Repository trait for Article persistence
///
/// Every call starts its work right away on a separate task and returns the
/// channel its single result arrives on.
#[cfg_attr(test, mockall::automock)]
pub trait ArticleRepository: Send + Sync {
    /// Insert, or update in place when `input.id` names an existing row
    fn save(&self, input: SaveArticle) -> ResultChannel<Article, ArticleError>;

    /// `ArticleError::NotFound` when no row has this id
    fn get_by_id(&self, id: i32) -> ResultChannel<Article, ArticleError>;

    /// One page of articles matching `query`
    fn get_all(&self, query: &ArticleQuery) -> ResultChannel<Vec<Article>, ArticleError>;

    /// Number of articles matching `query`, ignoring paging
    fn get_total(&self, query: &ArticleQuery) -> ResultChannel<u64, ArticleError>;
}

/// In-memory implementation of ArticleRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryArticleRepository {
    articles: Arc<RwLock<BTreeMap<i32, Article>>>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_query(article: &Article, query: &ArticleQuery) -> bool {
    query.q.is_empty() || article.title.contains(&query.q)
}

fn sort(articles: &mut [Article], order_by: OrderBy, direction: SortDirection) {
    articles.sort_by(|a, b| {
        let ordering = match order_by {
            OrderBy::Id => a.id.cmp(&b.id),
            OrderBy::Title => a.title.cmp(&b.title),
            OrderBy::Summary => a.summary.cmp(&b.summary),
            OrderBy::Created => a.created.cmp(&b.created),
            OrderBy::Modified => a.modified.cmp(&b.modified),
        }
        .then(a.id.cmp(&b.id));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

impl ArticleRepository for InMemoryArticleRepository {
    fn save(&self, input: SaveArticle) -> ResultChannel<Article, ArticleError> {
        let articles = self.articles.clone();

        spawn_result("article_repository_save", async move {
            let mut articles = articles.write().await;

            if let Some(existing) = input.id.and_then(|id| articles.get_mut(&id)) {
                existing.title = input.title;
                existing.summary = input.summary;
                if let Some(description) = input.description {
                    existing.description = description;
                }
                if let Some(image) = input.image {
                    existing.image = image;
                }
                existing.modified = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

                tracing::info!(article_id = existing.id, "Updated article");
                return Ok(existing.clone());
            }

            let id = articles.keys().next_back().map_or(1, |last| last + 1);
            let article = Article {
                id,
                title: input.title,
                summary: input.summary,
                description: input.description.unwrap_or_default(),
                image: input.image.unwrap_or_default(),
                created: input.created,
                modified: None,
            };
            articles.insert(id, article.clone());

            tracing::info!(article_id = id, "Created article");
            Ok(article)
        })
    }

    fn get_by_id(&self, id: i32) -> ResultChannel<Article, ArticleError> {
        let articles = self.articles.clone();

        spawn_result("article_repository_get_by_id", async move {
            articles
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or(ArticleError::NotFound(id))
        })
    }

    fn get_all(&self, query: &ArticleQuery) -> ResultChannel<Vec<Article>, ArticleError> {
        let articles = self.articles.clone();
        let query = query.clone();

        spawn_result("article_repository_get_all", async move {
            let mut result: Vec<Article> = articles
                .read()
                .await
                .values()
                .filter(|a| matches_query(a, &query))
                .cloned()
                .collect();

            sort(&mut result, query.order_by, query.sort);

            Ok(result
                .into_iter()
                .skip(query.offset() as usize)
                .take(query.limit as usize)
                .collect())
        })
    }

    fn get_total(&self, query: &ArticleQuery) -> ResultChannel<u64, ArticleError> {
        let articles = self.articles.clone();
        let query = query.clone();

        spawn_result("article_repository_get_total", async move {
            let count = articles
                .read()
                .await
                .values()
                .filter(|a| matches_query(a, &query))
                .count();
            Ok(count as u64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone};

    fn created(offset: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset)
    }

    fn input(title: &str, offset: i64) -> SaveArticle {
        SaveArticle {
            id: None,
            title: title.to_string(),
            summary: format!("{title} summary"),
            description: None,
            image: None,
            created: created(offset),
        }
    }

    async fn seeded() -> InMemoryArticleRepository {
        let repo = InMemoryArticleRepository::new();
        for (i, title) in ["Alpha", "Beta", "Gamma rust", "Delta rust"].iter().enumerate() {
            repo.save(input(title, i as i64)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryArticleRepository::new();
        let first = repo.save(input("First", 0)).await.unwrap();
        let second = repo.save(input("Second", 1)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.modified, None);
    }

    #[tokio::test]
    async fn test_save_with_existing_id_updates_in_place() {
        let repo = InMemoryArticleRepository::new();
        let created = repo.save(input("Original", 0)).await.unwrap();

        let mut update = input("Renamed", 5).with_id(created.id);
        update.description = Some("now with a body".into());
        let updated = repo.save(update).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, "now with a body");
        assert_eq!(updated.created, created.created);
        assert!(updated.modified.is_some());

        let total = repo.get_total(&ArticleQuery::default()).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_inserts() {
        let repo = InMemoryArticleRepository::new();
        let saved = repo.save(input("Fresh", 0).with_id(42)).await.unwrap();
        assert_eq!(saved.id, 1);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let repo = InMemoryArticleRepository::new();
        let err = repo.get_by_id(9).await.unwrap_err();
        assert_eq!(err, ArticleError::NotFound(9));
    }

    #[tokio::test]
    async fn test_get_all_filters_sorts_and_pages() {
        let repo = seeded().await;

        let query = ArticleQuery {
            q: "rust".into(),
            ..Default::default()
        };
        let found = repo.get_all(&query).await.unwrap();
        let titles: Vec<_> = found.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Delta rust", "Gamma rust"]);
        assert_eq!(repo.get_total(&query).await.unwrap(), 2);

        let query = ArticleQuery {
            order_by: OrderBy::Title,
            sort: SortDirection::Asc,
            limit: 2,
            page: 2,
            ..Default::default()
        };
        let page = repo.get_all(&query).await.unwrap();
        let titles: Vec<_> = page.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Delta rust", "Gamma rust"]);
        assert_eq!(repo.get_total(&query).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_ties_break_on_id_in_sort_direction() {
        let repo = InMemoryArticleRepository::new();
        for title in ["One", "Two", "Three"] {
            repo.save(input(title, 0)).await.unwrap();
        }

        let newest_first = repo.get_all(&ArticleQuery::default()).await.unwrap();
        let ids: Vec<_> = newest_first.iter().map(|a| a.id).collect();
        assert_eq!(ids, [3, 2, 1]);

        let query = ArticleQuery {
            sort: SortDirection::Asc,
            ..Default::default()
        };
        let oldest_first = repo.get_all(&query).await.unwrap();
        let ids: Vec<_> = oldest_first.iter().map(|a| a.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let repo = seeded().await;
        let query = ArticleQuery {
            page: 9,
            ..Default::default()
        };
        assert!(repo.get_all(&query).await.unwrap().is_empty());
    }
}
