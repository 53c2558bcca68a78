// File: src/forms/mod.rs
// Purpose: Form objects, validation results and JSON error extraction

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};

pub mod validators;

/// Error key for messages not tied to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Field name to error messages. [`NON_FIELD_ERRORS`] holds general errors.
pub type FormErrors = BTreeMap<String, Vec<String>>;

/// Trait for types that can be validated
pub trait Validate {
    /// Returns Ok(()) if valid, or Err with a map of field names to error messages.
    /// Each field can have multiple validation errors.
    fn validate(&self) -> Result<(), HashMap<String, Vec<String>>>;
}

/// Result of validation with errors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: FormErrors,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: FormErrors::new(),
        }
    }

    /// Create a failed validation result
    pub fn failure(errors: HashMap<String, Vec<String>>) -> Self {
        Self {
            is_valid: false,
            errors: errors.into_iter().collect(),
        }
    }

    /// Convert from Result
    pub fn from_result(result: Result<(), HashMap<String, Vec<String>>>) -> Self {
        match result {
            Ok(()) => Self::success(),
            Err(errors) => Self::failure(errors),
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get first error for a specific field
    pub fn get_error(&self, field: &str) -> Option<&String> {
        self.errors.get(field).and_then(|errors| errors.first())
    }

    /// Get all errors for a specific field
    pub fn get_errors(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    fn push(&mut self, field: &str, message: String) {
        self.errors.entry(field.to_string()).or_default().push(message);
        self.is_valid = false;
    }
}

/// A bound form as seen by the dispatcher.
pub trait Form: Send + Sync {
    fn is_valid(&self) -> bool;

    fn errors(&self) -> &FormErrors;

    /// Value exposed to templates when the form sits in extra context.
    fn to_context(&self) -> Value;
}

/// Submitted data paired with the result of validating it once.
///
/// ```ignore
/// let form = BoundForm::bind(ContactForm { email, message });
/// if !form.is_valid() {
///     let extra = Extra::new().form("form", form);
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BoundForm<T> {
    data: T,
    result: ValidationResult,
}

impl<T: Validate> BoundForm<T> {
    pub fn bind(data: T) -> Self {
        let result = ValidationResult::from_result(data.validate());
        Self { data, result }
    }
}

impl<T> BoundForm<T> {
    /// Record an error found after validation (e.g. a failed lookup).
    pub fn add_error(mut self, field: &str, message: impl Into<String>) -> Self {
        self.result.push(field, message.into());
        self
    }

    pub fn add_non_field_error(self, message: impl Into<String>) -> Self {
        self.add_error(NON_FIELD_ERRORS, message)
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }
}

impl<T> Form for BoundForm<T>
where
    T: Serialize + Send + Sync,
{
    fn is_valid(&self) -> bool {
        self.result.is_valid
    }

    fn errors(&self) -> &FormErrors {
        &self.result.errors
    }

    fn to_context(&self) -> Value {
        json!({
            "values": crate::context::to_value_or_null("values", &self.data),
            "errors": &self.result.errors,
            "is_valid": self.result.is_valid,
        })
    }
}

/// Structured errors returned in INVALID responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrorPayload {
    pub general_errors: Option<String>,
    pub field_errors: BTreeMap<String, String>,
}

impl FormErrorPayload {
    pub fn is_empty(&self) -> bool {
        self.general_errors.is_none() && self.field_errors.is_empty()
    }

    /// `field_errors` is left out entirely when no field failed.
    pub fn into_value(self) -> Value {
        let mut body = Map::new();
        if let Some(general) = self.general_errors {
            body.insert("general_errors".into(), Value::String(general));
        }
        if !self.field_errors.is_empty() {
            let fields = self
                .field_errors
                .into_iter()
                .map(|(field, message)| (field, Value::String(message)))
                .collect();
            body.insert("field_errors".into(), Value::Object(fields));
        }
        Value::Object(body)
    }
}

/// Gathers errors from every invalid form, flattening each field's
/// messages into one space-joined string.
///
/// When several forms carry general errors the last one wins.
pub fn collect_form_errors<'a>(forms: impl IntoIterator<Item = &'a dyn Form>) -> FormErrorPayload {
    let mut payload = FormErrorPayload::default();

    for form in forms.into_iter().filter(|form| !form.is_valid()) {
        for (field, messages) in form.errors() {
            let flattened = messages.join(" ");
            if field == NON_FIELD_ERRORS {
                payload.general_errors = Some(flattened);
            } else {
                payload.field_errors.insert(field.clone(), flattened);
            }
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Serialize)]
    struct Signup {
        name: String,
    }

    impl Validate for Signup {
        fn validate(&self) -> Result<(), HashMap<String, Vec<String>>> {
            let mut errors = HashMap::new();
            if self.name.is_empty() {
                errors.insert(
                    "name".to_string(),
                    vec!["required".to_string(), "too short".to_string()],
                );
            }
            if errors.is_empty() {
                Ok(())
            } else {
                Err(errors)
            }
        }
    }

    fn signup(name: &str) -> BoundForm<Signup> {
        BoundForm::bind(Signup { name: name.to_string() })
    }

    #[test]
    fn test_bind_runs_validation() {
        assert!(signup("ada").is_valid());
        let form = signup("");
        assert!(!form.is_valid());
        assert_eq!(form.result().get_error("name"), Some(&"required".to_string()));
    }

    #[test]
    fn test_add_non_field_error_invalidates() {
        let form = signup("ada").add_non_field_error("bad");
        assert!(!form.is_valid());
        assert_eq!(form.errors()[NON_FIELD_ERRORS], vec!["bad".to_string()]);
    }

    #[test]
    fn test_collect_splits_general_and_field_errors() {
        let form = signup("").add_non_field_error("bad");
        let payload = collect_form_errors([&form as &dyn Form]);
        assert_eq!(
            payload.into_value(),
            json!({
                "general_errors": "bad",
                "field_errors": { "name": "required too short" }
            })
        );
    }

    #[test]
    fn test_collect_skips_valid_forms() {
        let valid = signup("ada");
        let payload = collect_form_errors([&valid as &dyn Form]);
        assert!(payload.is_empty());
        assert_eq!(payload.into_value(), json!({}));
    }

    #[test]
    fn test_last_general_error_wins() {
        let first = signup("ada").add_non_field_error("first");
        let second = signup("bob").add_non_field_error("second");
        let payload = collect_form_errors([&first as &dyn Form, &second as &dyn Form]);
        assert_eq!(payload.general_errors.as_deref(), Some("second"));
        assert!(payload.field_errors.is_empty());
    }

    #[test]
    fn test_form_template_context() {
        let form = signup("");
        assert_eq!(
            form.to_context(),
            json!({
                "values": { "name": "" },
                "errors": { "name": ["required", "too short"] },
                "is_valid": false
            })
        );
    }
}
