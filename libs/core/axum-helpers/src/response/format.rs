use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::ACCEPT, request::Parts},
};
use std::convert::Infallible;

/// Wire format picked from the request's `Accept` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// `application/xml` and `text/xml` select XML; anything else is JSON.
    pub fn from_accept(accept: &str) -> Self {
        let wants_xml = accept.split(',').any(|part| {
            let mime = part.split(';').next().unwrap_or("").trim();
            mime.eq_ignore_ascii_case("application/xml") || mime.eq_ignore_ascii_case("text/xml")
        });

        if wants_xml {
            ResponseFormat::Xml
        } else {
            ResponseFormat::Json
        }
    }

    /// Format requested by the `Accept` header, JSON when absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(ACCEPT)
            .and_then(|value| value.to_str().ok())
            .map(ResponseFormat::from_accept)
            .unwrap_or_default()
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::Xml => "application/xml; charset=utf-8",
        }
    }
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ResponseFormat::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_header_selection() {
        assert_eq!(ResponseFormat::from_accept("application/xml"), ResponseFormat::Xml);
        assert_eq!(ResponseFormat::from_accept("TEXT/XML; q=0.9"), ResponseFormat::Xml);
        assert_eq!(
            ResponseFormat::from_accept("text/html, application/xml;q=0.9"),
            ResponseFormat::Xml
        );
        assert_eq!(ResponseFormat::from_accept("application/json"), ResponseFormat::Json);
        assert_eq!(ResponseFormat::from_accept("*/*"), ResponseFormat::Json);
        assert_eq!(ResponseFormat::from_accept(""), ResponseFormat::Json);
    }

    #[test]
    fn test_from_headers_defaults_to_json() {
        let mut headers = HeaderMap::new();
        assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Json);

        headers.insert(ACCEPT, "application/xml".parse().unwrap());
        assert_eq!(ResponseFormat::from_headers(&headers), ResponseFormat::Xml);
    }
}
