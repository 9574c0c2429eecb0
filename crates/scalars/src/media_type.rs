//! MIME media types (RFC2045), e.g. `text/html; charset=utf-8`.
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{FormatError, ScalarKind};

lazy_static! {
    static ref MEDIA_TYPE: Regex = Regex::new(
        r"^([A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*)/([A-Za-z0-9][A-Za-z0-9!#$&^_.+-]*)(\s*;.*)?$"
    )
    .unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType(String);

impl MediaType {
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        if MEDIA_TYPE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(FormatError::new(
                ScalarKind::MediaType,
                format!("{s:?} is not a type/subtype pair"),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `type/subtype` in lower case, without parameters.
    pub fn essence(&self) -> String {
        self.0
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn parse(raw: &Value) -> Result<MediaType, FormatError> {
    match raw {
        Value::String(s) => MediaType::parse(s),
        other => Err(FormatError::unexpected(ScalarKind::MediaType, "string", other)),
    }
}

pub fn format(value: &MediaType) -> Value {
    Value::String(value.0.clone())
}
