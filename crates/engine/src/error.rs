use thiserror::Error;
use vocab_scalars::FormatError;

use crate::schema::Cardinality;

/// Errors raised while decoding wire maps or mutating vocabulary objects.
#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    /// No codec declared for the property accepts the value, and the
    /// property does not retain unknown data. `source` is the complaint of
    /// the last codec tried, including a wrong JSON shape such as a map
    /// reaching a scalar-only property.
    #[error("property `{property}`: {source}")]
    Format {
        property: String,
        source: FormatError,
    },
    /// The value's shape fits no declared alternative and no scalar codec
    /// was tried: an object or link only property given a bare value, or a
    /// functional property given several values.
    #[error("property `{property}` cannot hold a JSON {found}")]
    UnexpectedShape {
        property: String,
        found: &'static str,
    },
    /// A nested object failed to decode.
    #[error("property `{property}`: {source}")]
    Nested {
        property: String,
        source: Box<CodecError>,
    },
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("object carries no type")]
    MissingType,
    #[error("no registered type among {0:?}")]
    UnhandledType(Vec<String>),
    #[error("`{type_name}` has no property `{property}`")]
    UnknownProperty { type_name: String, property: String },
    #[error("property `{property}` does not accept {kind}")]
    KindNotAllowed { property: String, kind: String },
    #[error("property `{property}` is {expected}")]
    CardinalityMismatch {
        property: String,
        expected: Cardinality,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl CodecError {
    pub(crate) fn nested(property: &str, source: CodecError) -> Self {
        CodecError::Nested {
            property: property.to_string(),
            source: Box::new(source),
        }
    }
}

/// Errors raised while building or installing a type registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("type `{0}` is already registered")]
    DuplicateEntry(String),
    #[error("the registry is frozen, types must be registered before first use")]
    AlreadyFrozen,
}
