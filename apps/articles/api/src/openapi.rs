use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::HttpResponse, axum_helpers::Meta)
    ),
    info(
        title = "Articles API",
        version = "0.1.0",
        description = "Create, fetch and list articles. Every response uses the same envelope."
    ),
    nest(
        (path = domain_articles::handlers::BASE_PATH, api = domain_articles::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
