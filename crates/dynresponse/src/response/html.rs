// dynresponse/src/response/html.rs — rendered template document
use super::base::{finalize_response, BaseResponse};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::Result;

pub struct HtmlResponse {
    base: BaseResponse,
    markup: String,
}

impl HtmlResponse {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            base: BaseResponse::new(),
            markup: markup.into(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.base.status(status);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Result<Self> {
        self.base.header(key, value)?;
        Ok(self)
    }
}

impl IntoResponse for HtmlResponse {
    fn into_response(self) -> Response {
        finalize_response(self.base, axum::response::Html(self.markup))
    }
}
