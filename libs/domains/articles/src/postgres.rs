use chrono::Utc;
use result_channel::{ResultChannel, spawn_result};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};
use tracing::{error, warn};

use crate::{
    entity,
    error::{ArticleError, ArticleResult},
    models::{Article, ArticleQuery, OrderBy, SaveArticle, SortDirection},
    repository::ArticleRepository,
};

/// Postgres-backed repository.
///
/// Reads go to `read`; saves run in a transaction on `write`. Both handles
/// are pools and cheap to clone into each spawned operation.
#[derive(Clone)]
pub struct PgArticleRepository {
    read: DatabaseConnection,
    write: DatabaseConnection,
}

impl PgArticleRepository {
    pub fn new(read: DatabaseConnection, write: DatabaseConnection) -> Self {
        Self { read, write }
    }
}

fn order_column(order_by: OrderBy) -> entity::Column {
    match order_by {
        OrderBy::Id => entity::Column::Id,
        OrderBy::Title => entity::Column::Title,
        OrderBy::Summary => entity::Column::Summary,
        OrderBy::Created => entity::Column::Created,
        OrderBy::Modified => entity::Column::Modified,
    }
}

fn order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

fn filtered(query: &ArticleQuery) -> Select<entity::Entity> {
    let select = entity::Entity::find();
    if query.q.is_empty() {
        select
    } else {
        select.filter(entity::Column::Title.contains(&query.q))
    }
}

async fn update(
    txn: &DatabaseTransaction,
    existing: entity::Model,
    input: SaveArticle,
) -> Result<entity::Model, sea_orm::DbErr> {
    let mut active: entity::ActiveModel = existing.into();
    active.title = Set(input.title);
    active.summary = Set(input.summary);
    if let Some(description) = input.description {
        active.description = Set(Some(description));
    }
    if let Some(image) = input.image {
        active.image = Set(Some(image));
    }
    active.modified = Set(Some(Utc::now().into()));
    active.update(txn).await
}

async fn insert(
    txn: &DatabaseTransaction,
    input: SaveArticle,
) -> Result<entity::Model, sea_orm::DbErr> {
    entity::ActiveModel {
        id: NotSet,
        title: Set(input.title),
        summary: Set(input.summary),
        description: Set(input.description),
        image: Set(input.image),
        created: Set(input.created.into()),
        modified: Set(None),
    }
    .insert(txn)
    .await
}

async fn save_article(
    read: DatabaseConnection,
    write: DatabaseConnection,
    input: SaveArticle,
) -> ArticleResult<Article> {
    const CONTEXT: &str = "article_repository_save";

    let txn = write.begin().await.inspect_err(|e| {
        error!(context = CONTEXT, scope = "tx_begin", error = %e, "failed to begin transaction");
    })?;

    // An error here drops `txn`, which rolls it back.
    let existing = match input.id {
        Some(id) => entity::Entity::find_by_id(id).one(&read).await?,
        None => None,
    };

    let written = match existing {
        Some(model) => update(&txn, model, input).await,
        None => insert(&txn, input).await,
    };

    match written {
        Ok(model) => {
            txn.commit().await?;
            tracing::info!(article_id = model.id, "Saved article");
            Ok(model.into())
        }
        Err(e) => {
            error!(context = CONTEXT, scope = "save_or_update_article", error = %e, "statement failed");
            if let Err(rollback) = txn.rollback().await {
                warn!(context = CONTEXT, scope = "tx_rollback", error = %rollback, "rollback failed");
            }
            Err(e.into())
        }
    }
}

impl ArticleRepository for PgArticleRepository {
    fn save(&self, input: SaveArticle) -> ResultChannel<Article, ArticleError> {
        let (read, write) = (self.read.clone(), self.write.clone());
        spawn_result("article_repository_save", save_article(read, write, input))
    }

    fn get_by_id(&self, id: i32) -> ResultChannel<Article, ArticleError> {
        let read = self.read.clone();

        spawn_result("article_repository_get_by_id", async move {
            let model = entity::Entity::find_by_id(id)
                .one(&read)
                .await
                .inspect_err(|e| {
                    error!(context = "article_repository_get_by_id", scope = "select", error = %e, "query failed");
                })?;

            model.map(Article::from).ok_or(ArticleError::NotFound(id))
        })
    }

    fn get_all(&self, query: &ArticleQuery) -> ResultChannel<Vec<Article>, ArticleError> {
        let read = self.read.clone();
        let query = query.clone();

        spawn_result("article_repository_get_all", async move {
            let direction = order(query.sort);
            let models = filtered(&query)
                .order_by(order_column(query.order_by), direction.clone())
                .order_by(entity::Column::Id, direction)
                .limit(query.limit)
                .offset(query.offset())
                .all(&read)
                .await
                .inspect_err(|e| {
                    error!(context = "article_repository_get_all", scope = "select", error = %e, "query failed");
                })?;

            Ok(models.into_iter().map(Article::from).collect())
        })
    }

    fn get_total(&self, query: &ArticleQuery) -> ResultChannel<u64, ArticleError> {
        let read = self.read.clone();
        let query = query.clone();

        spawn_result("article_repository_get_total", async move {
            let total = filtered(&query).count(&read).await.inspect_err(|e| {
                error!(context = "article_repository_get_total", scope = "count", error = %e, "query failed");
            })?;
            Ok(total)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr, Value};
    use std::collections::BTreeMap;

    fn model(id: i32, title: &str) -> entity::Model {
        entity::Model {
            id,
            title: title.to_string(),
            summary: format!("{title} summary"),
            description: None,
            image: None,
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().into(),
            modified: None,
        }
    }

    fn repo(db: MockDatabase) -> PgArticleRepository {
        let conn = db.into_connection();
        PgArticleRepository::new(conn.clone(), conn)
    }

    fn save_input(title: &str) -> SaveArticle {
        SaveArticle {
            id: None,
            title: title.to_string(),
            summary: format!("{title} summary"),
            description: None,
            image: None,
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_maps_row() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(5, "Five")]]),
        );

        let article = repo.get_by_id(5).await.unwrap();
        assert_eq!(article.id, 5);
        assert_eq!(article.title, "Five");
        assert_eq!(article.description, "");
    }

    #[tokio::test]
    async fn test_get_by_id_missing_row_is_not_found() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<entity::Model>::new()]),
        );

        let err = repo.get_by_id(5).await.unwrap_err();
        assert_eq!(err, ArticleError::NotFound(5));
    }

    #[tokio::test]
    async fn test_storage_error_carries_raw_message() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_errors([DbErr::Query(
                RuntimeErr::Internal("connection reset".to_string()),
            )]),
        );

        let err = repo.get_by_id(5).await.unwrap_err();
        assert!(matches!(err, ArticleError::Database(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_get_all_maps_rows() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(2, "Two"), model(1, "One")]]),
        );

        let articles = repo.get_all(&ArticleQuery::default()).await.unwrap();
        let ids: Vec<_> = articles.iter().map(|a| a.id).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[tokio::test]
    async fn test_get_total_reads_count() {
        let row: BTreeMap<&str, Value> = [("num_items", 3i64.into())].into();
        let repo = repo(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row]]));

        let query = ArticleQuery {
            q: "rust".into(),
            ..Default::default()
        };
        assert_eq!(repo.get_total(&query).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_save_without_id_inserts() {
        let repo = repo(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![model(11, "Fresh")]]),
        );

        let saved = repo.save(save_input("Fresh")).await.unwrap();
        assert_eq!(saved.id, 11);
        assert_eq!(saved.title, "Fresh");
    }

    #[tokio::test]
    async fn test_save_failed_statement_is_database_error() {
        let repo = repo(MockDatabase::new(DatabaseBackend::Postgres).append_query_errors([
            DbErr::Query(RuntimeErr::Internal(
                "value too long for type character varying(100)".to_string(),
            )),
        ]));

        let err = repo.save(save_input("Too long")).await.unwrap_err();
        assert!(matches!(err, ArticleError::Database(_)));
        assert!(err.to_string().contains("character varying(100)"));
    }

    #[test]
    fn test_order_mapping() {
        assert!(matches!(order_column(OrderBy::Created), entity::Column::Created));
        assert!(matches!(order_column(OrderBy::Modified), entity::Column::Modified));
        assert!(matches!(order(SortDirection::Asc), Order::Asc));
        assert!(matches!(order(SortDirection::Desc), Order::Desc));
    }
}
