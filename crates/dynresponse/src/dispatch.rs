// File: src/dispatch.rs
// Purpose: Dynamic responses that serialize for API requests and render or redirect otherwise

use axum::response::{IntoResponse, Response};

use crate::config::{settings, ResponseConfig};
use crate::context::{context_status, merge_context, Context, Extra};
use crate::error::{DispatchError, Result};
use crate::forms::collect_form_errors;
use crate::request::ApiRequest;
use crate::response::{apply_extra_headers, HtmlResponse, JsonResponse, RedirectResponse};
use crate::status::ResponseStatus;
use crate::template::TemplateEngine;

/// Optional data attached to a dynamic response.
#[derive(Debug, Clone, Default)]
pub struct ResponseOptions {
    /// Merged into the template context; forms here feed INVALID payloads
    pub extra: Extra,
    /// Set verbatim on the final response, whichever branch produced it
    pub extra_headers: Vec<(String, String)>,
}

impl ResponseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extra(mut self, extra: Extra) -> Self {
        self.extra = extra;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((key.into(), value.into()));
        self
    }
}

/// What a non-API request receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Render the named template with the merged context
    Render { template: String },
    /// Redirect to the location
    Redirect { url: String },
    /// Serialize like an API request
    Serialize,
}

/// A view result that is turned into HTML, a redirect or JSON once the
/// request kind is known.
///
/// ```ignore
/// async fn inbox(api: ApiRequest, State(app): State<AppState>) -> Result<Response, DispatchError> {
///     let context = context! { messages: load_messages() };
///     DynamicResponse::serialize_or_render("inbox.html", context)
///         .render_response(&api, &*app.templates)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DynamicResponse {
    context: Context,
    status: ResponseStatus,
    options: ResponseOptions,
    fallback: Fallback,
}

impl DynamicResponse {
    /// The status is read from the context's `status` entry here and never
    /// changes afterwards.
    pub fn new(context: Context, fallback: Fallback) -> Self {
        let status = context_status(&context);
        Self {
            context,
            status,
            options: ResponseOptions::default(),
            fallback,
        }
    }

    /// Renders `template` for browsers, serializes for API clients.
    pub fn serialize_or_render(template: impl Into<String>, context: Context) -> Self {
        Self::new(
            context,
            Fallback::Render {
                template: template.into(),
            },
        )
    }

    /// Redirects browsers to `url`, serializes for API clients.
    pub fn serialize_or_redirect(url: impl Into<String>, context: Context) -> Self {
        Self::new(context, Fallback::Redirect { url: url.into() })
    }

    /// Serializes for every request. Useful for AJAX-only views.
    pub fn serialize(context: Context) -> Self {
        Self::new(context, Fallback::Serialize)
    }

    pub fn with_options(mut self, options: ResponseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.options = std::mem::take(&mut self.options).extra(extra);
        self
    }

    /// Shorthand for adding one header to the current options.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options = std::mem::take(&mut self.options).header(key, value);
        self
    }

    pub fn status(&self) -> ResponseStatus {
        self.status
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn options(&self) -> &ResponseOptions {
        &self.options
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    /// Context and extra combined; extra wins on key collision.
    pub fn full_context(&self) -> Context {
        merge_context(&self.context, &self.options.extra)
    }

    /// JSON for this response under the process-wide settings.
    pub fn resolve_as_json(&self) -> JsonResponse {
        self.resolve_as_json_with(settings())
    }

    pub fn resolve_as_json_with(&self, config: &ResponseConfig) -> JsonResponse {
        match self.status {
            ResponseStatus::Ok => JsonResponse::new(self.context.clone().into()),
            ResponseStatus::InvalidData
                if config.json_form_errors && !self.options.extra.is_empty() =>
            {
                let forms = self.options.extra.forms();
                let payload = collect_form_errors(forms);
                tracing::debug!(
                    general = payload.general_errors.is_some(),
                    fields = payload.field_errors.len(),
                    "Serializing form errors"
                );
                JsonResponse::new(payload.into_value()).status(self.status.status_code())
            }
            status => JsonResponse::empty(status.status_code()),
        }
    }

    /// Produces the final response for `request`.
    ///
    /// Template, redirect and header failures are returned as-is; nothing is
    /// retried.
    pub fn render_response(
        self,
        request: &ApiRequest,
        templates: &dyn TemplateEngine,
    ) -> Result<Response> {
        self.render_response_with(request, templates, settings())
    }

    pub fn render_response_with(
        self,
        request: &ApiRequest,
        templates: &dyn TemplateEngine,
        config: &ResponseConfig,
    ) -> Result<Response> {
        tracing::debug!(
            status = %self.status,
            is_api = request.is_api,
            fallback = ?self.fallback,
            "Dispatching dynamic response"
        );

        let mut response = match (&self.fallback, request.is_api) {
            (Fallback::Serialize, _) | (_, true) => {
                self.resolve_as_json_with(config).into_response()
            }
            (Fallback::Render { template }, false) => {
                let html = templates
                    .render(template, &self.full_context())
                    .map_err(|source| DispatchError::Template {
                        name: template.clone(),
                        source,
                    })?;
                HtmlResponse::new(html).into_response()
            }
            (Fallback::Redirect { url }, false) => RedirectResponse::to(url)?.into_response(),
        };

        apply_extra_headers(&mut response, &self.options.extra_headers)?;
        Ok(response)
    }
}
