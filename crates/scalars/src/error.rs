use serde_json::Value;
use thiserror::Error;

use crate::ScalarKind;

/// Raised when a wire value does not satisfy the grammar of the codec
/// it was handed to.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind}: {reason}")]
pub struct FormatError {
    pub kind: ScalarKind,
    pub reason: String,
}

impl FormatError {
    pub fn new(kind: ScalarKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// The raw value has the wrong JSON shape altogether.
    pub(crate) fn unexpected(kind: ScalarKind, expected: &str, found: &Value) -> Self {
        Self::new(kind, format!("expected {expected}, found {}", describe(found)))
    }
}

/// Short name of the JSON shape of `value`, used in error messages.
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
