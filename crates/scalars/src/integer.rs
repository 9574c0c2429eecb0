//! `xsd:nonNegativeInteger`
use serde_json::Value;

use crate::{FormatError, ScalarKind};

pub fn parse(raw: &Value) -> Result<u64, FormatError> {
    let Value::Number(n) = raw else {
        return Err(FormatError::unexpected(
            ScalarKind::NonNegativeInteger,
            "number",
            raw,
        ));
    };

    n.as_u64().ok_or_else(|| {
        FormatError::new(
            ScalarKind::NonNegativeInteger,
            format!("{n} is not a non-negative integer"),
        )
    })
}

pub fn format(value: u64) -> Value {
    Value::from(value)
}
