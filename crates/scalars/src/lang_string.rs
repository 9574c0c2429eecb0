//! `rdf:langString`, as a JSON-LD value object:
//! `{"@value": "chat", "@language": "fr"}`.
//!
//! Per-language variants of a whole property travel separately, under the
//! sibling `<property>Map` key; that table lives in the engine crate.
use serde_json::{Map, Value};

use crate::{FormatError, LanguageTag, ScalarKind};

const VALUE: &str = "@value";
const LANGUAGE: &str = "@language";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangString {
    pub value: String,
    pub language: Option<LanguageTag>,
}

impl LangString {
    pub fn new(value: impl Into<String>, language: LanguageTag) -> Self {
        Self {
            value: value.into(),
            language: Some(language),
        }
    }
}

pub fn parse(raw: &Value) -> Result<LangString, FormatError> {
    let Value::Object(map) = raw else {
        return Err(FormatError::unexpected(ScalarKind::LangString, "object", raw));
    };

    if let Some(key) = map.keys().find(|k| *k != VALUE && *k != LANGUAGE) {
        return Err(FormatError::new(
            ScalarKind::LangString,
            format!("unexpected key {key:?} in value object"),
        ));
    }

    let value = match map.get(VALUE) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(FormatError::unexpected(ScalarKind::LangString, "string @value", other))
        }
        None => return Err(FormatError::new(ScalarKind::LangString, "missing @value")),
    };

    let language = match map.get(LANGUAGE) {
        Some(Value::String(tag)) => Some(LanguageTag::parse(tag).map_err(|e| {
            FormatError::new(ScalarKind::LangString, e.reason)
        })?),
        Some(other) => {
            return Err(FormatError::unexpected(ScalarKind::LangString, "string @language", other))
        }
        None => None,
    };

    Ok(LangString { value, language })
}

pub fn format(value: &LangString) -> Value {
    let mut map = Map::new();
    map.insert(VALUE.to_string(), Value::String(value.value.clone()));
    if let Some(language) = &value.language {
        map.insert(LANGUAGE.to_string(), Value::String(language.as_str().to_string()));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value_object() {
        let ls = parse(&json!({"@value": "chat", "@language": "fr"})).unwrap();
        assert_eq!(ls.value, "chat");
        assert_eq!(ls.language.unwrap().as_str(), "fr");

        let ls = parse(&json!({"@value": "cat"})).unwrap();
        assert_eq!(ls.language, None);
        assert_eq!(format(&ls), json!({"@value": "cat"}));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(parse(&json!("chat")).is_err());
        assert!(parse(&json!({"@language": "fr"})).is_err());
        assert!(parse(&json!({"@value": 5})).is_err());
        assert!(parse(&json!({"@value": "chat", "@language": "not a tag"})).is_err());
        assert!(parse(&json!({"@value": "chat", "type": "Note"})).is_err());
    }
}
