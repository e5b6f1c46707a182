//! JSON body extractor with validation.

use crate::errors::MultiError;
use crate::response::{HttpResponse, ResponseFormat};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Envelope message when the body cannot be bound.
pub const BIND_PARAM_MESSAGE: &str = "error bind param";
/// Envelope message when a bound value fails validation.
pub const VALIDATE_PARAMS_MESSAGE: &str = "validate params";

/// JSON extractor with automatic validation.
///
/// Rejections are envelopes:
/// - body not bindable → 400 `"error bind param"`, `errors.bindParam`
/// - validation failed → 400 `"validate params"`, one entry per field
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<ArticleInput>) -> Response {
///     // input has passed `Validate::validate`
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = ResponseFormat::from_headers(req.headers());
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            let mut errors = MultiError::new();
            errors.append_message("bindParam", e.body_text());
            tracing::warn!(context = "validated_json", scope = "bind", error = %errors, "request body rejected");

            HttpResponse::new(StatusCode::BAD_REQUEST, BIND_PARAM_MESSAGE)
                .with_errors(errors)
                .render(format)
        })?;

        data.validate().map_err(|e| validation_rejection("validated_json", format, e))?;

        Ok(ValidatedJson(data))
    }
}

pub(crate) fn validation_rejection(
    context: &'static str,
    format: ResponseFormat,
    e: validator::ValidationErrors,
) -> Response {
    let errors = MultiError::from(e);
    tracing::info!(context, scope = "validate", error = %errors, "request validation failed");

    HttpResponse::new(StatusCode::BAD_REQUEST, VALIDATE_PARAMS_MESSAGE)
        .with_errors(errors)
        .render(format)
}
