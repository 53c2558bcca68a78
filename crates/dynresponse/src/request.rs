// dynresponse/src/request.rs

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::convert::Infallible;

/// Header a client can send to force an API response.
pub const API_REQUEST_HEADER: &str = "x-api-request";

/// Whether the client wants machine-readable JSON instead of HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiRequest {
    pub is_api: bool,
}

impl ApiRequest {
    pub fn api() -> Self {
        Self { is_api: true }
    }

    pub fn browser() -> Self {
        Self { is_api: false }
    }

    /// A request is an API request when it posts JSON, explicitly asks for
    /// JSON without accepting HTML, or carries the `x-api-request` header.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header_str = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_ascii_lowercase()
        };

        let content_type = header_str(header::CONTENT_TYPE);
        let accept = header_str(header::ACCEPT);

        let sends_json = content_type.starts_with("application/json");
        let wants_json = accept.contains("application/json") && !accept.contains("text/html");
        let flagged = headers.contains_key(API_REQUEST_HEADER);

        Self {
            is_api: sends_json || wants_json || flagged,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ApiRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
