//! End-to-end dispatch through an Axum router.
//!
//! Each route returns one of the three dynamic response kinds; requests are
//! classified by the `ApiRequest` extractor from their headers.

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use dynresponse::forms::validators::{is_required, Errors};
use dynresponse::{
    context, ApiRequest, BoundForm, DispatchError, DynamicResponse, Extra, ResponseConfig,
    ResponseStatus, Templates, Validate,
};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Clone)]
struct AppState {
    templates: Arc<Templates>,
    config: ResponseConfig,
}

#[derive(Serialize)]
struct NoteForm {
    title: String,
}

impl Validate for NoteForm {
    fn validate(&self) -> Result<(), HashMap<String, Vec<String>>> {
        let mut errors = Errors::new();
        errors.check(is_required(&self.title), "title", "required");
        errors.finish()
    }
}

async fn note_page(
    api: ApiRequest,
    State(app): State<AppState>,
) -> Result<Response, DispatchError> {
    DynamicResponse::serialize_or_render("note.html", context! { title: "First", id: 7 })
        .header("X-Frame-Options", "DENY")
        .render_response_with(&api, &*app.templates, &app.config)
}

async fn invalid_note(
    api: ApiRequest,
    State(app): State<AppState>,
) -> Result<Response, DispatchError> {
    let form = BoundForm::bind(NoteForm { title: String::new() })
        .add_non_field_error("bad");
    DynamicResponse::serialize_or_redirect(
        "/notes",
        context! { status: ResponseStatus::InvalidData },
    )
    .with_extra(Extra::new().form("form", form))
    .header("X-Frame-Options", "DENY")
    .render_response_with(&api, &*app.templates, &app.config)
}

async fn deleted_note(
    api: ApiRequest,
    State(app): State<AppState>,
) -> Result<Response, DispatchError> {
    DynamicResponse::serialize(context! { status: ResponseStatus::Deleted })
        .header("X-Frame-Options", "DENY")
        .render_response_with(&api, &*app.templates, &app.config)
}

async fn missing_template(
    api: ApiRequest,
    State(app): State<AppState>,
) -> Result<Response, DispatchError> {
    DynamicResponse::serialize_or_render("missing.html", context! {})
        .render_response_with(&api, &*app.templates, &app.config)
}

fn app(json_form_errors: bool) -> Router {
    let mut templates = Templates::new();
    templates.add_source("note.html", "<h1>{title}</h1>");

    Router::new()
        .route("/note", get(note_page))
        .route("/note/invalid", get(invalid_note))
        .route("/note/deleted", get(deleted_note))
        .route("/broken", get(missing_template))
        .with_state(AppState {
            templates: Arc::new(templates),
            config: ResponseConfig { json_form_errors },
        })
}

fn browser(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ACCEPT, "text/html,application/xhtml+xml")
        .body(Body::empty())
        .unwrap()
}

fn api(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap()
}

async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}

#[tokio::test]
async fn test_browser_gets_rendered_template() {
    let resp = app(false).oneshot(browser("/note")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
    assert_eq!(body_text(resp).await, "<h1>First</h1>");
}

#[tokio::test]
async fn test_api_gets_full_context() {
    let resp = app(false).oneshot(api("/note")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
    assert_eq!(body_json(resp).await, json!({ "title": "First", "id": 7 }));
}

#[tokio::test]
async fn test_invalid_browser_is_redirected() {
    let resp = app(true).oneshot(browser("/note/invalid")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers()[header::LOCATION], "/notes");
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn test_invalid_api_reports_form_errors() {
    let resp = app(true).oneshot(api("/note/invalid")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({
            "general_errors": "bad",
            "field_errors": { "title": "required" }
        })
    );
}

#[tokio::test]
async fn test_invalid_api_without_flag_is_empty() {
    let resp = app(false).oneshot(api("/note/invalid")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, json!({}));
}

#[tokio::test]
async fn test_deleted_has_no_body_for_any_client() {
    for req in [browser("/note/deleted"), api("/note/deleted")] {
        let resp = app(false).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["x-frame-options"], "DENY");
        assert_eq!(body_text(resp).await, "");
    }
}

#[tokio::test]
async fn test_template_failure_is_500() {
    let resp = app(false).oneshot(browser("/broken")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // API clients never touch the template engine
    let resp = app(false).oneshot(api("/broken")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
