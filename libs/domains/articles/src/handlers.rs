use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{
    DATA_NOT_FOUND, HttpResponse, Meta, NumericPath, ResponseFormat, ValidatedJson,
    ValidatedQuery,
    errors::responses::{BindErrorResponse, OperationErrorResponse, ValidationErrorResponse},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

use crate::error::ArticleError;
use crate::models::{Article, ArticleInput, ArticleQuery, QueryParams, SaveArticle};
use crate::repository::ArticleRepository;
use crate::usecase::ArticleUseCase;

pub const TAG: &str = "articles";
/// Where the app mounts [`router`]
pub const BASE_PATH: &str = "/v1/article";

pub const SAVED_MESSAGE: &str = "Data has been save";
pub const GET_BY_ID_MESSAGE: &str = "Article Get By ID";
pub const LIST_MESSAGE: &str = "Article List";
pub const EMPTY_LIST_MESSAGE: &str = "Search results empty";

/// OpenAPI documentation for Articles API
#[derive(OpenApi)]
#[openapi(
    paths(create_article, get_article, list_articles),
    components(
        schemas(Article, ArticleInput, HttpResponse, Meta),
        responses(BindErrorResponse, ValidationErrorResponse, OperationErrorResponse)
    ),
    tags(
        (name = TAG, description = "Article management endpoints")
    )
)]
pub struct ApiDoc;

/// Article routes, to be nested at [`BASE_PATH`]
pub fn router<R: ArticleRepository + 'static>(usecase: ArticleUseCase<R>) -> Router {
    let shared_usecase = Arc::new(usecase);

    Router::new()
        .route("/", get(list_articles::<R>).post(create_article::<R>))
        .route("/{id}", get(get_article::<R>))
        .with_state(shared_usecase)
}

fn operation_failed(error: &ArticleError) -> HttpResponse {
    HttpResponse::new(StatusCode::BAD_REQUEST, error.to_string())
}

/// Create an article
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ArticleInput,
    responses(
        (status = 200, description = "Article saved", body = HttpResponse),
        (status = 400, response = ValidationErrorResponse)
    )
)]
async fn create_article<R: ArticleRepository + 'static>(
    State(usecase): State<Arc<ArticleUseCase<R>>>,
    ValidatedJson(input): ValidatedJson<ArticleInput>,
) -> Response {
    let input = SaveArticle::from_input(input, Utc::now());

    match usecase.save(input).await {
        Ok(article) => {
            info!(context = "article_handler_create", article_id = article.id, "article saved");
            HttpResponse::new(StatusCode::OK, SAVED_MESSAGE).into_response()
        }
        Err(e) => {
            error!(context = "article_handler_create", scope = "err_res_save", error = %e, "save failed");
            operation_failed(&e).into_response()
        }
    }
}

/// Get an article by id
///
/// A missing article is answered with 200 and `success: false`.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article found, or \"data not found\"", body = HttpResponse),
        (status = 400, response = OperationErrorResponse)
    )
)]
async fn get_article<R: ArticleRepository + 'static>(
    State(usecase): State<Arc<ArticleUseCase<R>>>,
    format: ResponseFormat,
    NumericPath(id): NumericPath,
) -> Response {
    let response = match usecase.get_by_id(id).await {
        Ok(article) => HttpResponse::new(StatusCode::OK, GET_BY_ID_MESSAGE)
            .with_data(&article)
            .with_meta(Meta::new(1, 1, 1)),
        Err(ArticleError::NotFound(_)) => HttpResponse::new(StatusCode::OK, DATA_NOT_FOUND),
        Err(e) => {
            error!(context = "article_handler_get_by_id", scope = "err_res_get_by_id", error = %e, "lookup failed");
            operation_failed(&e)
        }
    };

    response.render(format)
}

/// List articles
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(QueryParams),
    responses(
        (status = 200, description = "One page of articles, or \"Search results empty\"", body = HttpResponse),
        (status = 400, response = ValidationErrorResponse)
    )
)]
async fn list_articles<R: ArticleRepository + 'static>(
    State(usecase): State<Arc<ArticleUseCase<R>>>,
    format: ResponseFormat,
    ValidatedQuery(params): ValidatedQuery<QueryParams>,
) -> Response {
    let query = ArticleQuery::from(params);
    let (page, limit) = (query.page, query.limit);

    let response = match usecase.get_all(query).await {
        Ok(result) if result.total == 0 => HttpResponse::new(StatusCode::OK, EMPTY_LIST_MESSAGE),
        Ok(result) => HttpResponse::new(StatusCode::OK, LIST_MESSAGE)
            .with_data(&result.data)
            .with_meta(Meta::new(result.total, page, limit)),
        Err(e) => {
            error!(context = "article_handler_get_all", scope = "err_res_get_all", error = %e, "listing failed");
            operation_failed(&e)
        }
    };

    response.render(format)
}
