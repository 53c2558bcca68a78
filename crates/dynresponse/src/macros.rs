// dynresponse/src/macros.rs
// Context builder macro. Keys are identifiers, values anything `Serialize`.

/// Builds a [`Context`](crate::Context), keeping insertion order.
///
/// ```
/// use dynresponse::{context, ResponseStatus};
///
/// let ctx = context! { title: "Inbox", unread: 3, status: ResponseStatus::NotFound };
/// assert_eq!(ctx["unread"], 3);
/// assert_eq!(ctx["status"], serde_json::json!(["NOT_FOUND", 404]));
/// ```
#[macro_export]
macro_rules! context {
    () => {
        $crate::Context::new()
    };

    ( $($key:ident : $value:expr),+ $(,)? ) => {{
        let mut context = $crate::Context::new();
        $(
            context.insert(
                stringify!($key).to_string(),
                $crate::context::to_value_or_null(stringify!($key), $value),
            );
        )+
        context
    }};
}
