// dynresponse-server/src/layout.rs — page shell and maud templates for the demo views
use dynresponse::{Context, Templates};
use maud::{html, Markup, DOCTYPE};
use serde_json::Value;

/// Renders a full HTML page around `body`.
pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                (body)
            }
        }
    }
}

fn text<'a>(value: Option<&'a Value>) -> &'a str {
    value.and_then(Value::as_str).unwrap_or("")
}

fn contact(context: &Context) -> Markup {
    let form = context.get("form");
    let values = form.and_then(|f| f.get("values"));
    let errors = form.and_then(|f| f.get("errors"));
    let field_errors = |field: &str| -> Vec<String> {
        errors
            .and_then(|e| e.get(field))
            .and_then(Value::as_array)
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|m| m.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    };

    page(
        text(context.get("title")),
        html! {
            h1 { (text(context.get("title"))) }
            @for message in field_errors("__all__") {
                p.error { (message) }
            }
            form method="post" action="/contact" {
                label { "Email" input name="email" value=(text(values.and_then(|v| v.get("email")))); }
                @for message in field_errors("email") {
                    span.error { (message) }
                }
                label { "Message" textarea name="message" { (text(values.and_then(|v| v.get("message")))) } }
                @for message in field_errors("message") {
                    span.error { (message) }
                }
                button type="submit" { "Send" }
            }
        },
    )
}

fn thanks(context: &Context) -> Markup {
    page("Thanks", html! { p { (text(context.get("message"))) } })
}

/// Built-in templates; files loaded from the templates directory override them.
pub fn builtin_templates() -> Templates {
    let mut templates = Templates::new();
    templates
        .add_markup("contact.html", contact)
        .add_markup("thanks.html", thanks);
    templates
}
