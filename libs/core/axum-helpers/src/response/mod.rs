//! Uniform response envelope.
//!
//! Every endpoint answers with the same shape:
//!
//! ```json
//! {
//!   "success": true,
//!   "code": 200,
//!   "message": "Article List",
//!   "meta": {"page": 1, "limit": 10, "totalRecords": 42, "totalPages": 5},
//!   "data": [...],
//!   "errors": {"field": "message"}
//! }
//! ```
//!
//! `meta` and `errors` are omitted when empty; `data` is `{}` when nothing
//! was attached.

mod format;
mod meta;

pub use format::ResponseFormat;
pub use meta::Meta;

use crate::errors::MultiError;
use axum::{
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Message that marks a by-id lookup with no row. Responses carrying it
/// report `success: false` even though the status is 200.
pub const DATA_NOT_FOUND: &str = "data not found";

/// Root element name of XML responses.
const XML_ROOT: &str = "response";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("response data could not be serialized: {0}")]
    Data(String),

    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML rendering failed: {0}")]
    Xml(String),
}

/// One optional slot of an envelope, as accepted by [`HttpResponse::build`].
#[derive(Debug, Clone)]
pub enum ResponseParam {
    Data(Value),
    Meta(Meta),
    Errors(MultiError),
}

impl ResponseParam {
    pub fn data<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(ResponseParam::Data)
    }
}

impl From<Meta> for ResponseParam {
    fn from(meta: Meta) -> Self {
        ResponseParam::Meta(meta)
    }
}

impl From<&Meta> for ResponseParam {
    fn from(meta: &Meta) -> Self {
        ResponseParam::Meta(*meta)
    }
}

impl From<MultiError> for ResponseParam {
    fn from(errors: MultiError) -> Self {
        ResponseParam::Errors(errors)
    }
}

impl From<&MultiError> for ResponseParam {
    fn from(errors: &MultiError) -> Self {
        ResponseParam::Errors(errors.clone())
    }
}

/// The response envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HttpResponse {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[schema(value_type = Object)]
    pub data: Value,
    #[serde(skip_serializing_if = "MultiError::is_empty")]
    #[schema(value_type = Object)]
    pub errors: MultiError,
    #[serde(skip)]
    failure: Option<String>,
}

impl HttpResponse {
    /// Envelope with no meta, no errors and `{}` data.
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: code.as_u16() < 400 && message != DATA_NOT_FOUND,
            code: code.as_u16(),
            message,
            meta: None,
            data: Value::Object(Map::new()),
            errors: MultiError::default(),
            failure: None,
        }
    }

    /// Envelope filled from a list of params. A later `Data` replaces an
    /// earlier one; the same holds for `Meta` and `Errors`.
    pub fn build<I>(code: StatusCode, message: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = ResponseParam>,
    {
        params
            .into_iter()
            .fold(Self::new(code, message), |response, param| match param {
                ResponseParam::Data(data) => response.with_value(data),
                ResponseParam::Meta(meta) => response.with_meta(meta),
                ResponseParam::Errors(errors) => response.with_errors(errors),
            })
    }

    /// Attach serializable data. A value that cannot be serialized turns the
    /// whole response into a rendering failure (500).
    pub fn with_data<T: Serialize + ?Sized>(mut self, data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => self.data = value,
            Err(e) => self.failure = Some(e.to_string()),
        }
        self
    }

    fn with_value(mut self, data: Value) -> Self {
        self.data = if data.is_null() {
            Value::Object(Map::new())
        } else {
            data
        };
        self
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_errors(mut self, errors: impl Into<MultiError>) -> Self {
        self.errors = errors.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        self.check_data()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Same fields as [`to_json`](Self::to_json) under a `<response>` root.
    /// An empty list still renders an empty `<data/>` element.
    pub fn to_xml(&self) -> Result<String, RenderError> {
        self.check_data()?;

        if matches!(&self.data, Value::Array(items) if items.is_empty()) {
            let mut response = self.clone();
            response.data = Value::Object(Map::new());
            return response.to_xml();
        }

        quick_xml::se::to_string_with_root(XML_ROOT, self)
            .map_err(|e| RenderError::Xml(e.to_string()))
    }

    fn check_data(&self) -> Result<(), RenderError> {
        match &self.failure {
            Some(reason) => Err(RenderError::Data(reason.clone())),
            None => Ok(()),
        }
    }

    /// Render in the negotiated format. A rendering failure is logged and
    /// answered with a bare 500, never with a substitute envelope.
    pub fn render(self, format: ResponseFormat) -> Response {
        let body = match format {
            ResponseFormat::Json => self.to_json(),
            ResponseFormat::Xml => self.to_xml(),
        };

        match body {
            Ok(body) => (self.status(), [(CONTENT_TYPE, format.content_type())], body).into_response(),
            Err(e) => {
                error!(
                    context = "http_response",
                    scope = "render",
                    code = self.code,
                    response_message = %self.message,
                    error = %e,
                    "failed to render response envelope"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        self.render(ResponseFormat::Json)
    }
}
