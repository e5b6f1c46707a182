//! Integer id path parameter extractor.

use crate::errors::MultiError;
use crate::response::{HttpResponse, ResponseFormat};
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::Response,
};

/// Envelope message when the id segment is not a number.
pub const VALIDATE_ID_MESSAGE: &str = "validate id";

/// Extracts a numeric `{id}` path segment.
///
/// Anything that does not parse as `i32` is rejected with 400
/// `"validate id"` and `errors.error = "id must be numeric"`, rendered in the
/// format the `Accept` header asks for.
///
/// ```ignore
/// async fn get_by_id(NumericPath(id): NumericPath) -> Response { .. }
///
/// let app = Router::new().route("/v1/article/{id}", get(get_by_id));
/// ```
pub struct NumericPath(pub i32);

impl<S> FromRequestParts<S> for NumericPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let format = ResponseFormat::from_headers(&parts.headers);
        let raw = Path::<String>::from_request_parts(parts, state)
            .await
            .map(|Path(raw)| raw)
            .unwrap_or_default();

        raw.trim().parse::<i32>().map(NumericPath).map_err(|_| {
            tracing::info!(context = "numeric_path", scope = "validate_id", id = %raw, "rejected non-numeric id");

            let mut errors = MultiError::new();
            errors.append_message("error", "id must be numeric");
            HttpResponse::new(StatusCode::BAD_REQUEST, VALIDATE_ID_MESSAGE)
                .with_errors(errors)
                .render(format)
        })
    }
}
