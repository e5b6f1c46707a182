//! Query-string extractor with validation.

use super::validated_json::validation_rejection;
use crate::errors::MultiError;
use crate::response::{HttpResponse, ResponseFormat};
use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Envelope message when the query string cannot be bound.
pub const BIND_QUERY_MESSAGE: &str = "bind params";

/// Query extractor with automatic validation.
///
/// Rejections are envelopes:
/// - query not bindable → 400 `"bind params"`, `errors.bindError`
/// - validation failed → 400 `"validate params"`, one entry per field
///
/// Both are rendered in the format the `Accept` header asks for.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let format = ResponseFormat::from_headers(&parts.headers);
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                let mut errors = MultiError::new();
                errors.append_message("bindError", e.body_text());
                tracing::warn!(context = "validated_query", scope = "bind", error = %errors, "query rejected");

                HttpResponse::new(StatusCode::BAD_REQUEST, BIND_QUERY_MESSAGE)
                    .with_errors(errors)
                    .render(format)
            })?;

        params
            .validate()
            .map_err(|e| validation_rejection("validated_query", format, e))?;

        Ok(ValidatedQuery(params))
    }
}
