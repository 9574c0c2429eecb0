//! `xsd:boolean`
//!
//! Besides JSON booleans, the lexical numbers `0` and `1` are accepted as
//! XML Schema allows them.
use serde_json::Value;

use crate::{FormatError, ScalarKind};

pub fn parse(raw: &Value) -> Result<bool, FormatError> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(FormatError::new(
                ScalarKind::Boolean,
                format!("number {n} is neither 0 nor 1"),
            )),
        },
        other => Err(FormatError::unexpected(ScalarKind::Boolean, "boolean", other)),
    }
}

pub fn format(value: bool) -> Value {
    Value::Bool(value)
}
