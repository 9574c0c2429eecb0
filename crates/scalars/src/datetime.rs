//! `xsd:dateTime`, carried on the wire as RFC3339.
use chrono::{DateTime, FixedOffset, SecondsFormat};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{FormatError, ScalarKind};

lazy_static! {
    // Some producers drop the seconds, e.g. "2006-01-02T15:04Z".
    static ref WITHOUT_SECONDS: Regex =
        Regex::new(r"^(\d{4}-\d{2}-\d{2}T\d{2}:\d{2})(Z|[+-]\d{2}:\d{2})$").unwrap();
}

pub fn parse(raw: &Value) -> Result<DateTime<FixedOffset>, FormatError> {
    let Some(s) = raw.as_str() else {
        return Err(FormatError::unexpected(ScalarKind::DateTime, "string", raw));
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    if let Some(caps) = WITHOUT_SECONDS.captures(s) {
        let padded = format!("{}:00{}", &caps[1], &caps[2]);
        if let Ok(dt) = DateTime::parse_from_rfc3339(&padded) {
            return Ok(dt);
        }
    }

    Err(FormatError::new(
        ScalarKind::DateTime,
        format!("{s:?} is not an RFC3339 date-time"),
    ))
}

pub fn format(value: &DateTime<FixedOffset>) -> Value {
    Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}
