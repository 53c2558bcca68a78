// File: src/forms/validators.rs
// Purpose: Basic field validators for hand-written `Validate` impls

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Whitespace-only input counts as missing
pub fn is_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Length in characters, not bytes
pub fn min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Accumulates per-field messages and turns them into a `validate()` result.
#[derive(Debug, Default)]
pub struct Errors {
    errors: HashMap<String, Vec<String>>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors
                .entry(field.to_string())
                .or_default()
                .push(message.to_string());
        }
        self
    }

    pub fn finish(self) -> Result<(), HashMap<String, Vec<String>>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
