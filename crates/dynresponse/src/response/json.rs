// dynresponse/src/response/json.rs — JSON payload with an explicit status code
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use super::base::{finalize_response, BaseResponse};
use crate::error::Result;

pub struct JsonResponse {
    base: BaseResponse,
    body: Option<Value>,
}

impl JsonResponse {
    pub fn new(body: Value) -> Self {
        Self {
            base: BaseResponse::new(),
            body: Some(body),
        }
    }

    /// No payload: renders as `{}`, or nothing at all for 204.
    pub fn empty(status: StatusCode) -> Self {
        let mut base = BaseResponse::new();
        base.status(status);
        Self { base, body: None }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.base.status(status);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Result<Self> {
        self.base.header(key, value)?;
        Ok(self)
    }

    pub fn status_code(&self) -> StatusCode {
        self.base.status_code()
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl IntoResponse for JsonResponse {
    fn into_response(self) -> Response {
        if self.base.status_code() == StatusCode::NO_CONTENT {
            return finalize_response(self.base, ());
        }
        let body = self.body.unwrap_or_else(|| Value::Object(Map::new()));
        finalize_response(self.base, axum::Json(body))
    }
}
