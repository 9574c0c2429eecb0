//! IRIs, used both for `xsd:anyURI` values and for bare references.
use std::{cmp::Ordering, fmt, hash, str::FromStr};

use serde_json::Value;
use url::Url;

use crate::{FormatError, ScalarKind};

/// An absolute IRI.
///
/// The text is kept exactly as received so that formatting reproduces it;
/// the parsed [`Url`] is available through [`Iri::as_url`].
#[derive(Debug, Clone)]
pub struct Iri {
    raw: String,
    url: Url,
}

impl Iri {
    pub fn parse(s: &str) -> Result<Self, FormatError> {
        // Relative references fail here: an IRI needs a scheme.
        let url = Url::parse(s)
            .map_err(|e| FormatError::new(ScalarKind::AnyUri, format!("{s:?}: {e}")))?;

        Ok(Self {
            raw: s.to_string(),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl PartialEq for Iri {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Iri {}

impl hash::Hash for Iri {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for Iri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Iri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Iri {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Iri {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Url> for Iri {
    fn from(url: Url) -> Self {
        Self {
            raw: url.to_string(),
            url,
        }
    }
}

pub fn parse(raw: &Value) -> Result<Iri, FormatError> {
    match raw {
        Value::String(s) => Iri::parse(s),
        other => Err(FormatError::unexpected(ScalarKind::AnyUri, "string", other)),
    }
}

pub fn format(value: &Iri) -> Value {
    Value::String(value.raw.clone())
}
