// dynresponse/src/response/redirect.rs — redirect issued to browser requests
use super::base::{finalize_response, BaseResponse};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::{DispatchError, Result};

pub struct RedirectResponse {
    base: BaseResponse,
}

impl RedirectResponse {
    /// 302 Found to `location`.
    pub fn to(location: &str) -> Result<Self> {
        let value = HeaderValue::from_str(location)
            .map_err(|_| DispatchError::InvalidLocation(location.to_string()))?;

        let mut base = BaseResponse::new();
        base.status(StatusCode::FOUND);
        base.insert_header(header::LOCATION, value);
        Ok(Self { base })
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.base.status(status);
        self
    }
}

impl IntoResponse for RedirectResponse {
    fn into_response(self) -> Response {
        finalize_response(self.base, ())
    }
}
