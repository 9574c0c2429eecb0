use std::fmt;

use vocab_scalars::ScalarKind;

/// The alternatives a property may accept, in the order they are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A nested typed value resolved through the object table.
    Object,
    /// A nested typed value resolved through the link table.
    Link,
    /// A bare reference to another node.
    Iri,
    Scalar(ScalarKind),
}

impl Kind {
    pub const STRING: Kind = Kind::Scalar(ScalarKind::String);
    pub const LANG_STRING: Kind = Kind::Scalar(ScalarKind::LangString);
    pub const FLOAT: Kind = Kind::Scalar(ScalarKind::Float);
    pub const DATE_TIME: Kind = Kind::Scalar(ScalarKind::DateTime);
    pub const DURATION: Kind = Kind::Scalar(ScalarKind::Duration);
    pub const ANY_URI: Kind = Kind::Scalar(ScalarKind::AnyUri);
    pub const MEDIA_TYPE: Kind = Kind::Scalar(ScalarKind::MediaType);
    pub const NON_NEGATIVE_INTEGER: Kind = Kind::Scalar(ScalarKind::NonNegativeInteger);
    pub const BOOLEAN: Kind = Kind::Scalar(ScalarKind::Boolean);
    pub const BCP47: Kind = Kind::Scalar(ScalarKind::Bcp47);

    pub fn is_typed(&self) -> bool {
        matches!(self, Kind::Object | Kind::Link)
    }

    /// Position used when ordering values of different kinds.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Kind::Object => 0,
            Kind::Link => 1,
            Kind::Iri => 2,
            Kind::Scalar(_) => 3,
        }
    }
}

impl From<ScalarKind> for Kind {
    fn from(kind: ScalarKind) -> Self {
        Kind::Scalar(kind)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Object => f.write_str("object"),
            Kind::Link => f.write_str("link"),
            Kind::Iri => f.write_str("IRI"),
            Kind::Scalar(kind) => kind.fmt(f),
        }
    }
}
