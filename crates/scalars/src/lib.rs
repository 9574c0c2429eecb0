/*! # vocab-scalars

Parse/format pairs for the primitive wire types used by ActivityStreams
vocabularies: plain and language-tagged strings, floats, RFC3339 date-times,
ISO8601 durations, IRIs, MIME media types, non-negative integers, booleans
and BCP47 language tags.

Every codec is a pair of free functions in its own module:
`parse(&Value) -> Result<T, FormatError>` and `format(&T) -> Value`.
`format` never fails. The [`Scalar`] enum ties them together for callers that
pick the codec at runtime.
*/
pub mod bcp47;
pub mod boolean;
pub mod datetime;
pub mod duration;
mod error;
pub mod float;
pub mod integer;
pub mod iri;
pub mod lang_string;
pub mod media_type;
pub mod string;

use std::{cmp::Ordering, fmt};

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

pub use bcp47::LanguageTag;
pub use duration::IsoDuration;
pub use error::{describe, FormatError};
pub use iri::Iri;
pub use lang_string::LangString;
pub use media_type::MediaType;

/// Identifies one primitive codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    String,
    LangString,
    Float,
    DateTime,
    Duration,
    AnyUri,
    MediaType,
    NonNegativeInteger,
    Boolean,
    Bcp47,
}

impl ScalarKind {
    /// The XML Schema / RDF name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "xsd:string",
            ScalarKind::LangString => "rdf:langString",
            ScalarKind::Float => "xsd:float",
            ScalarKind::DateTime => "xsd:dateTime",
            ScalarKind::Duration => "xsd:duration",
            ScalarKind::AnyUri => "xsd:anyURI",
            ScalarKind::MediaType => "rfc2045",
            ScalarKind::NonNegativeInteger => "xsd:nonNegativeInteger",
            ScalarKind::Boolean => "xsd:boolean",
            ScalarKind::Bcp47 => "bcp47",
        }
    }

    /// Whether the codec's wire form is a JSON object rather than a bare value.
    pub fn is_map_shaped(&self) -> bool {
        matches!(self, ScalarKind::LangString)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    LangString(LangString),
    Float(f64),
    DateTime(DateTime<FixedOffset>),
    Duration(IsoDuration),
    AnyUri(Iri),
    MediaType(MediaType),
    NonNegativeInteger(u64),
    Boolean(bool),
    Bcp47(LanguageTag),
}

impl Scalar {
    /// Decodes `raw` with the codec selected by `kind`.
    pub fn parse(kind: ScalarKind, raw: &Value) -> Result<Self, FormatError> {
        Ok(match kind {
            ScalarKind::String => Scalar::String(string::parse(raw)?),
            ScalarKind::LangString => Scalar::LangString(lang_string::parse(raw)?),
            ScalarKind::Float => Scalar::Float(float::parse(raw)?),
            ScalarKind::DateTime => Scalar::DateTime(datetime::parse(raw)?),
            ScalarKind::Duration => Scalar::Duration(duration::parse(raw)?),
            ScalarKind::AnyUri => Scalar::AnyUri(iri::parse(raw)?),
            ScalarKind::MediaType => Scalar::MediaType(media_type::parse(raw)?),
            ScalarKind::NonNegativeInteger => Scalar::NonNegativeInteger(integer::parse(raw)?),
            ScalarKind::Boolean => Scalar::Boolean(boolean::parse(raw)?),
            ScalarKind::Bcp47 => Scalar::Bcp47(bcp47::parse(raw)?),
        })
    }

    pub fn format(&self) -> Value {
        match self {
            Scalar::String(v) => string::format(v),
            Scalar::LangString(v) => lang_string::format(v),
            Scalar::Float(v) => float::format(*v),
            Scalar::DateTime(v) => datetime::format(v),
            Scalar::Duration(v) => duration::format(v),
            Scalar::AnyUri(v) => iri::format(v),
            Scalar::MediaType(v) => media_type::format(v),
            Scalar::NonNegativeInteger(v) => integer::format(*v),
            Scalar::Boolean(v) => boolean::format(*v),
            Scalar::Bcp47(v) => bcp47::format(v),
        }
    }

    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::LangString(_) => ScalarKind::LangString,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::DateTime(_) => ScalarKind::DateTime,
            Scalar::Duration(_) => ScalarKind::Duration,
            Scalar::AnyUri(_) => ScalarKind::AnyUri,
            Scalar::MediaType(_) => ScalarKind::MediaType,
            Scalar::NonNegativeInteger(_) => ScalarKind::NonNegativeInteger,
            Scalar::Boolean(_) => ScalarKind::Boolean,
            Scalar::Bcp47(_) => ScalarKind::Bcp47,
        }
    }

    /// Borrowed text of string-like scalars.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(v) => Some(v),
            Scalar::LangString(v) => Some(&v.value),
            Scalar::AnyUri(v) => Some(v.as_str()),
            Scalar::MediaType(v) => Some(v.as_str()),
            Scalar::Bcp47(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Orders two scalars of the same kind by value. Scalars of different
    /// kinds are ordered by kind.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::String(a), Scalar::String(b)) => a.cmp(b),
            (Scalar::LangString(a), Scalar::LangString(b)) => a
                .value
                .cmp(&b.value)
                .then_with(|| a.language.cmp(&b.language)),
            (Scalar::Float(a), Scalar::Float(b)) => a.total_cmp(b),
            (Scalar::DateTime(a), Scalar::DateTime(b)) => a.cmp(b),
            (Scalar::Duration(a), Scalar::Duration(b)) => a.to_chrono().cmp(&b.to_chrono()),
            (Scalar::AnyUri(a), Scalar::AnyUri(b)) => a.cmp(b),
            (Scalar::MediaType(a), Scalar::MediaType(b)) => a.as_str().cmp(b.as_str()),
            (Scalar::NonNegativeInteger(a), Scalar::NonNegativeInteger(b)) => a.cmp(b),
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a.cmp(b),
            (Scalar::Bcp47(a), Scalar::Bcp47(b)) => a.as_str().cmp(b.as_str()),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::NonNegativeInteger(value)
    }
}

impl From<DateTime<FixedOffset>> for Scalar {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Scalar::DateTime(value)
    }
}

impl From<IsoDuration> for Scalar {
    fn from(value: IsoDuration) -> Self {
        Scalar::Duration(value)
    }
}

impl From<LangString> for Scalar {
    fn from(value: LangString) -> Self {
        Scalar::LangString(value)
    }
}

impl From<MediaType> for Scalar {
    fn from(value: MediaType) -> Self {
        Scalar::MediaType(value)
    }
}
