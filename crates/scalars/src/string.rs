//! `xsd:string`
use serde_json::Value;

use crate::{FormatError, ScalarKind};

pub fn parse(raw: &Value) -> Result<String, FormatError> {
    raw.as_str()
        .map(str::to_string)
        .ok_or_else(|| FormatError::unexpected(ScalarKind::String, "string", raw))
}

pub fn format(value: &str) -> Value {
    Value::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_string() {
        assert_eq!(parse(&json!("hi")).unwrap(), "hi");
        assert_eq!(parse(&json!("")).unwrap(), "");
    }

    #[test]
    fn test_parse_rejects_non_string() {
        assert!(parse(&json!(5)).is_err());
        assert!(parse(&json!(["hi"])).is_err());
        assert!(parse(&Value::Null).is_err());
    }
}
