//! BCP47 language tags, e.g. `en`, `en-GB`, `zh-Hant-TW`.
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{FormatError, ScalarKind};

lazy_static! {
    static ref LANGUAGE_TAG: Regex = Regex::new(r"^[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        if LANGUAGE_TAG.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(FormatError::new(
                ScalarKind::Bcp47,
                format!("{s:?} is not a language tag"),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, lower-cased.
    pub fn primary(&self) -> String {
        self.0
            .split('-')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn parse(raw: &Value) -> Result<LanguageTag, FormatError> {
    match raw {
        Value::String(s) => LanguageTag::parse(s),
        other => Err(FormatError::unexpected(ScalarKind::Bcp47, "string", other)),
    }
}

pub fn format(value: &LanguageTag) -> Value {
    Value::String(value.0.clone())
}
