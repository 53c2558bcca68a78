// dynresponse-server/src/views.rs — contact form views built on dynamic responses
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{delete, get},
    Router,
};
use dynresponse::forms::validators::{is_required, is_valid_email, min_length, Errors};
use dynresponse::{
    context, ApiRequest, BoundForm, DispatchError, DynamicResponse, Extra, Form as _,
    ResponseOptions, ResponseStatus, Templates, Validate,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::extract::JsonOrForm;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<Templates>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<(), HashMap<String, Vec<String>>> {
        let mut errors = Errors::new();
        errors
            .check(is_required(&self.email), "email", "This field is required.")
            .check(
                self.email.is_empty() || is_valid_email(&self.email),
                "email",
                "Enter a valid email address.",
            )
            .check(is_required(&self.message), "message", "This field is required.")
            .check(
                min_length(self.message.trim(), 10),
                "message",
                "Ensure this value has at least 10 characters.",
            );
        errors.finish()
    }
}

type ViewResult = Result<Response, DispatchError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/contact", get(contact_page).post(contact_submit))
        .route("/contact/thanks", get(contact_thanks))
        .route("/contact/:id", delete(contact_delete))
        .route("/api/ping", get(ping))
        .with_state(state)
}

async fn contact_page(api: ApiRequest, State(app): State<AppState>) -> ViewResult {
    DynamicResponse::serialize_or_render("contact.html", context! { title: "Contact us" })
        .with_options(
            ResponseOptions::new()
                .extra(Extra::new().set("form", json!({ "values": {}, "errors": {} })))
                .header("Vary", "Accept"),
        )
        .render_response(&api, &*app.templates)
}

async fn contact_submit(
    api: ApiRequest,
    State(app): State<AppState>,
    JsonOrForm(data): JsonOrForm<ContactForm>,
) -> ViewResult {
    let form = BoundForm::bind(data);

    if !form.is_valid() {
        // Browsers get the form back with errors, API clients a 400
        return DynamicResponse::serialize_or_render(
            "contact.html",
            context! { title: "Contact us", status: ResponseStatus::InvalidData },
        )
        .with_extra(Extra::new().form("form", form))
        .render_response(&api, &*app.templates);
    }

    info!(email = %form.data().email, "Contact message received");
    DynamicResponse::serialize_or_redirect(
        "/contact/thanks",
        context! { email: &form.data().email },
    )
    .render_response(&api, &*app.templates)
}

async fn contact_thanks(api: ApiRequest, State(app): State<AppState>) -> ViewResult {
    DynamicResponse::serialize_or_render(
        "thanks.html",
        context! { message: "Thanks, we will be in touch." },
    )
    .render_response(&api, &*app.templates)
}

async fn contact_delete(
    api: ApiRequest,
    Path(id): Path<u64>,
    State(app): State<AppState>,
) -> ViewResult {
    info!(id, "Contact message deleted");
    DynamicResponse::serialize_or_redirect(
        "/contact",
        context! { status: ResponseStatus::Deleted },
    )
    .render_response(&api, &*app.templates)
}

/// AJAX-only endpoint; JSON for every client.
async fn ping(api: ApiRequest, State(app): State<AppState>) -> ViewResult {
    DynamicResponse::serialize(context! { pong: true })
        .header("Cache-Control", "no-store")
        .render_response(&api, &*app.templates)
}
