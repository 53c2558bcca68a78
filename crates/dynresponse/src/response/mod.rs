// dynresponse/src/response/mod.rs — HTTP response builders produced by dynamic responses
pub mod base;
pub mod html;
pub mod json;
pub mod redirect;

pub use base::apply_extra_headers;
pub use html::HtmlResponse;
pub use json::JsonResponse;
pub use redirect::RedirectResponse;
