// File: src/context.rs
// Purpose: Context and extra-context maps handed to templates and the JSON serializer

use crate::forms::Form;
use crate::status::ResponseStatus;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Ordered key/value data exposed to a template or serialized as JSON.
pub type Context = Map<String, Value>;

/// Key under which a view stores its [`ResponseStatus`].
pub const STATUS_KEY: &str = "status";

/// Reads the status entry of a context, defaulting to OK.
pub fn context_status(context: &Context) -> ResponseStatus {
    match context.get(STATUS_KEY) {
        None => ResponseStatus::Ok,
        Some(value) => ResponseStatus::from_value(value).unwrap_or_else(|| {
            tracing::warn!(status = %value, "Unrecognised response status, using OK");
            ResponseStatus::Ok
        }),
    }
}

/// Converts any serializable value, storing `null` if serialization fails.
#[doc(hidden)]
pub fn to_value_or_null(key: &str, value: impl serde::Serialize) -> Value {
    serde_json::to_value(value).unwrap_or_else(|err| {
        tracing::warn!(key, error = %err, "Failed to serialize context value");
        Value::Null
    })
}

/// A single extra-context entry.
#[derive(Clone)]
pub enum ExtraValue {
    Value(Value),
    Form(Arc<dyn Form>),
}

impl ExtraValue {
    /// Representation merged into the template context.
    pub fn to_context_value(&self) -> Value {
        match self {
            ExtraValue::Value(value) => value.clone(),
            ExtraValue::Form(form) => form.to_context(),
        }
    }

    pub fn as_form(&self) -> Option<&dyn Form> {
        match self {
            ExtraValue::Form(form) => Some(form.as_ref()),
            ExtraValue::Value(_) => None,
        }
    }
}

impl fmt::Debug for ExtraValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtraValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ExtraValue::Form(form) => f
                .debug_struct("Form")
                .field("is_valid", &form.is_valid())
                .finish(),
        }
    }
}

/// Supplementary template data, typically form instances.
///
/// Kept out of the default JSON payload; forms in here are the source of
/// structured validation errors for INVALID responses.
#[derive(Debug, Clone, Default)]
pub struct Extra {
    entries: Vec<(String, ExtraValue)>,
}

impl Extra {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a serializable value. Replaces an existing entry in place.
    pub fn set(mut self, key: impl Into<String>, value: impl serde::Serialize) -> Self {
        let key = key.into();
        let value = to_value_or_null(&key, value);
        self.insert(key, ExtraValue::Value(value));
        self
    }

    /// Insert a form object.
    pub fn form(mut self, key: impl Into<String>, form: impl Form + 'static) -> Self {
        self.insert(key.into(), ExtraValue::Form(Arc::new(form)));
        self
    }

    /// Insert a form that is shared with the caller.
    pub fn shared_form(mut self, key: impl Into<String>, form: Arc<dyn Form>) -> Self {
        self.insert(key.into(), ExtraValue::Form(form));
        self
    }

    pub fn insert(&mut self, key: String, value: ExtraValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Form objects in insertion order.
    pub fn forms(&self) -> impl Iterator<Item = &dyn Form> {
        self.entries.iter().filter_map(|(_, v)| v.as_form())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_context(&self) -> Context {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_context_value()))
            .collect()
    }
}

/// Context followed by extra; extra wins on key collision.
pub fn merge_context(context: &Context, extra: &Extra) -> Context {
    let mut full = context.clone();
    for (key, value) in extra.iter() {
        full.insert(key.to_string(), value.to_context_value());
    }
    full
}
