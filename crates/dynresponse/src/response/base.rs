// dynresponse/src/response/base.rs — shared status/header state and finalizer
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::{DispatchError, Result};

pub struct BaseResponse {
    headers: HeaderMap,
    status: StatusCode,
}

impl BaseResponse {
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
            status: StatusCode::OK,
        }
    }

    pub fn header(&mut self, key: &str, value: &str) -> Result<()> {
        let (name, value) = parse_header(key, value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    pub fn status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn insert_header(&mut self, key: HeaderName, value: HeaderValue) {
        self.headers.insert(key, value);
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl Default for BaseResponse {
    fn default() -> Self {
        Self::new()
    }
}

// shared finalizer
pub fn finalize_response(base: BaseResponse, body: impl IntoResponse) -> Response {
    (base.status, base.headers, body).into_response()
}

fn parse_header(key: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    match (
        HeaderName::from_bytes(key.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => Ok((name, value)),
        _ => Err(DispatchError::InvalidHeader {
            name: key.to_string(),
        }),
    }
}

/// Sets each header on an already built response, replacing any existing
/// value of the same name.
pub fn apply_extra_headers(response: &mut Response, headers: &[(String, String)]) -> Result<()> {
    for (key, value) in headers {
        let (name, value) = parse_header(key, value)?;
        response.headers_mut().insert(name, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_headers_replace_existing() {
        let mut resp = finalize_response(BaseResponse::new(), "body");
        resp.headers_mut()
            .insert("x-trace", HeaderValue::from_static("old"));

        apply_extra_headers(
            &mut resp,
            &[
                ("X-Trace".to_string(), "new".to_string()),
                ("Cache-Control".to_string(), "no-store".to_string()),
            ],
        )
        .unwrap();

        assert_eq!(resp.headers()["x-trace"], "new");
        assert_eq!(resp.headers()["cache-control"], "no-store");
    }

    #[test]
    fn test_invalid_header_name_is_rejected() {
        let mut resp = finalize_response(BaseResponse::new(), "");
        let err = apply_extra_headers(&mut resp, &[("bad header".into(), "v".into())])
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidHeader { name } if name == "bad header"));
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        let mut base = BaseResponse::new();
        assert!(base.header("x-note", "line\nbreak").is_err());
        assert!(base.headers().is_empty());
    }
}
