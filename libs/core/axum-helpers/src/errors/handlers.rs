use crate::response::HttpResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Router fallback: unknown routes still answer with an envelope.
pub async fn not_found() -> Response {
    HttpResponse::new(StatusCode::NOT_FOUND, "The requested resource was not found").into_response()
}

/// Response for a handler that panicked (see `CatchPanicLayer`).
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(context = "http", scope = "recover", error = %detail, "request handler panicked");

    HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}
