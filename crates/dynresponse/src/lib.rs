// dynresponse - content-negotiated responses for Axum
// One view result, rendered as HTML for browsers and serialized as JSON for API clients

#[macro_use]
mod macros;

pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod forms;
pub mod request;
pub mod response;
pub mod status;
pub mod template;

// Core API
pub use dispatch::{DynamicResponse, Fallback, ResponseOptions};
pub use request::ApiRequest;
pub use status::ResponseStatus;

// Context & forms
pub use context::{Context, Extra, ExtraValue, STATUS_KEY};
pub use forms::{BoundForm, Form, FormErrors, Validate, NON_FIELD_ERRORS};

// Framework types
pub use config::{Config, ResponseConfig};
pub use error::DispatchError;
pub use response::{HtmlResponse, JsonResponse, RedirectResponse};
pub use template::{TemplateEngine, Templates};

// Re-export commonly used types from dependencies
pub use axum;
pub use axum::http::StatusCode;
pub use axum::response::Response;
pub use maud;
