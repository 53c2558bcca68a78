// File: src/error.rs
// Purpose: Failures surfaced while turning a dynamic response into HTTP

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The template engine failed; its error is kept as the source.
    #[error("failed to render template `{name}`")]
    Template {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid redirect location `{0}`")]
    InvalidLocation(String),

    #[error("invalid response header `{name}`")]
    InvalidHeader { name: String },
}

pub type Result<T> = std::result::Result<T, DispatchError>;

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?anyhow::Error::from(self), "Failed to dispatch response");
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_template_error_keeps_source() {
        let err = DispatchError::Template {
            name: "inbox.html".into(),
            source: anyhow::anyhow!("template not found"),
        };
        assert_eq!(err.to_string(), "failed to render template `inbox.html`");
        assert_eq!(err.source().unwrap().to_string(), "template not found");
    }

    #[test]
    fn test_into_response_is_500() {
        let resp = DispatchError::InvalidHeader { name: "bad header".into() }.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
