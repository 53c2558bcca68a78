// File: src/status.rs
// Purpose: Fixed vocabulary of response outcomes and their HTTP codes

use axum::http::StatusCode;
use serde_json::Value;
use std::fmt;

/// Outcome of a view, carried in the context under the `status` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseStatus {
    #[default]
    Ok,
    InvalidData,
    NotFound,
    Confirm,
    Deleted,
    RequiresUpgrade,
}

impl ResponseStatus {
    pub const ALL: [ResponseStatus; 6] = [
        ResponseStatus::Ok,
        ResponseStatus::InvalidData,
        ResponseStatus::NotFound,
        ResponseStatus::Confirm,
        ResponseStatus::Deleted,
        ResponseStatus::RequiresUpgrade,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResponseStatus::Ok => "OK",
            ResponseStatus::InvalidData => "INVALID",
            ResponseStatus::NotFound => "NOT_FOUND",
            ResponseStatus::Confirm => "CONFIRM",
            ResponseStatus::Deleted => "DELETED",
            ResponseStatus::RequiresUpgrade => "REQUIRES_UPGRADE",
        }
    }

    pub fn code(self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::InvalidData => 400,
            ResponseStatus::NotFound => 404,
            ResponseStatus::Confirm => 405,
            ResponseStatus::Deleted => 204,
            ResponseStatus::RequiresUpgrade => 402,
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            ResponseStatus::Ok => StatusCode::OK,
            ResponseStatus::InvalidData => StatusCode::BAD_REQUEST,
            ResponseStatus::NotFound => StatusCode::NOT_FOUND,
            ResponseStatus::Confirm => StatusCode::METHOD_NOT_ALLOWED,
            ResponseStatus::Deleted => StatusCode::NO_CONTENT,
            ResponseStatus::RequiresUpgrade => StatusCode::PAYMENT_REQUIRED,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Reads a status from a context entry.
    ///
    /// Accepts the label (`"INVALID"`), the numeric code (`400`), or the
    /// `["INVALID", 400]` pair produced by [`ResponseStatus::to_value`].
    /// For a pair the code decides, matching how the status is dispatched.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(label) => Self::from_label(label),
            Value::Number(n) => n
                .as_u64()
                .and_then(|code| u16::try_from(code).ok())
                .and_then(Self::from_code),
            Value::Array(pair) if pair.len() == 2 => Self::from_value(&pair[1]),
            _ => None,
        }
    }

    pub fn to_value(self) -> Value {
        Value::Array(vec![Value::from(self.label()), Value::from(self.code())])
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<ResponseStatus> for Value {
    fn from(status: ResponseStatus) -> Self {
        status.to_value()
    }
}

impl serde::Serialize for ResponseStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeTuple;
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(self.label())?;
        pair.serialize_element(&self.code())?;
        pair.end()
    }
}
