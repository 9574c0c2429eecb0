//! The union cell holding one occurrence of a property value.
use std::cmp::Ordering;

use serde_json::Value;
use vocab_scalars::{describe, FormatError, Iri, Scalar};

use crate::{
    context::DecodeContext,
    error::CodecError,
    kind::Kind,
    object::VocabularyObject,
    registry::Capability,
    schema::{PropertySpec, UnknownPolicy},
};

/// Exactly one of the alternatives a property occurrence can take.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Object(Box<VocabularyObject>),
    Link(Box<VocabularyObject>),
    Iri(Iri),
    Scalar(Scalar),
    /// Data no declared kind accepted, kept verbatim.
    Unknown(Value),
}

impl PropertyValue {
    /// The populated alternative, `None` for opaque values.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            PropertyValue::Object(_) => Some(Kind::Object),
            PropertyValue::Link(_) => Some(Kind::Link),
            PropertyValue::Iri(_) => Some(Kind::Iri),
            PropertyValue::Scalar(s) => Some(Kind::Scalar(s.kind())),
            PropertyValue::Unknown(_) => None,
        }
    }

    pub fn is_kind(&self, kind: Kind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PropertyValue::Unknown(_))
    }

    pub fn as_object(&self) -> Option<&VocabularyObject> {
        match self {
            PropertyValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&VocabularyObject> {
        match self {
            PropertyValue::Link(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            PropertyValue::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            PropertyValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_unknown(&self) -> Option<&Value> {
        match self {
            PropertyValue::Unknown(v) => Some(v),
            _ => None,
        }
    }

    /// Text of a plain string value.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Text of any string-like value, IRIs included.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Iri(iri) => Some(iri.as_str()),
            PropertyValue::Scalar(s) => s.as_str(),
            _ => None,
        }
    }

    /// The IRI identifying the value, whether it is a bare reference or a
    /// nested node carrying an `id`.
    pub fn identifier(&self) -> Option<&Iri> {
        match self {
            PropertyValue::Iri(iri) => Some(iri),
            PropertyValue::Scalar(Scalar::AnyUri(iri)) => Some(iri),
            PropertyValue::Object(o) | PropertyValue::Link(o) => o.id(),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            PropertyValue::Object(o) | PropertyValue::Link(o) => o.to_value(),
            PropertyValue::Iri(iri) => Value::String(iri.as_str().to_string()),
            PropertyValue::Scalar(s) => s.format(),
            PropertyValue::Unknown(raw) => raw.clone(),
        }
    }

    /// Decodes one occurrence of `spec`'s property.
    ///
    /// Typed maps are resolved through the registry, the first declared type
    /// name that is registered under an allowed capability winning. Other
    /// values go through the declared scalar codecs in priority order. What
    /// nothing accepts is kept as [`PropertyValue::Unknown`] unless the
    /// property rejects unknown data.
    pub fn from_value(
        raw: &Value,
        spec: &PropertySpec,
        ctx: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        let mut last_error = None;

        if let Value::Object(map) = raw {
            let candidates = ctx.type_candidates(map);
            let allowed: Vec<Capability> = spec
                .kinds()
                .iter()
                .filter_map(|k| match k {
                    Kind::Object => Some(Capability::Object),
                    Kind::Link => Some(Capability::Link),
                    _ => None,
                })
                .collect();

            if !candidates.is_empty() && !allowed.is_empty() {
                match ctx.registry().resolve(candidates.as_slice(), &allowed) {
                    Some((capability, ctor)) => {
                        let object = ctor
                            .deserialize(map, ctx)
                            .map_err(|e| CodecError::nested(spec.name(), e))?;
                        return Ok(match capability {
                            Capability::Object => PropertyValue::Object(Box::new(object)),
                            Capability::Link => PropertyValue::Link(Box::new(object)),
                        });
                    }
                    None => tracing::debug!(
                        "property {}: no registered type among {candidates:?}",
                        spec.name()
                    ),
                }
            }

            for kind in map_shaped(spec) {
                match Scalar::parse(kind, raw) {
                    Ok(scalar) => return Ok(PropertyValue::Scalar(scalar)),
                    Err(e) => last_error = Some(e),
                }
            }

            // No map-shaped codec declared: the first bare codec reports the
            // wrong shape.
            if last_error.is_none() {
                last_error = spec
                    .kinds()
                    .iter()
                    .filter_map(|kind| parse_bare(kind, raw))
                    .find_map(Result::err);
            }
        } else {
            for kind in spec.kinds() {
                let Some(parsed) = parse_bare(kind, raw) else {
                    continue;
                };
                match parsed {
                    Ok(value) => return Ok(value),
                    Err(e) => last_error = Some(e),
                }
            }
        }

        PropertyValue::unknown(raw, spec, last_error)
    }

    fn unknown(
        raw: &Value,
        spec: &PropertySpec,
        last_error: Option<FormatError>,
    ) -> Result<Self, CodecError> {
        match spec.unknown_policy() {
            UnknownPolicy::Retain => {
                tracing::trace!("property {}: keeping unclassified {}", spec.name(), describe(raw));
                Ok(PropertyValue::Unknown(raw.clone()))
            }
            UnknownPolicy::Reject => Err(match last_error {
                Some(source) => CodecError::Format {
                    property: spec.name().to_string(),
                    source,
                },
                None => CodecError::UnexpectedShape {
                    property: spec.name().to_string(),
                    found: describe(raw),
                },
            }),
        }
    }

    /// Total order over values: by alternative first (objects, links, IRIs,
    /// scalars, opaque values), then by content.
    pub fn compare(&self, other: &Self) -> Ordering {
        let rank = |v: &Self| v.kind().map_or(u8::MAX, |k| k.rank());
        rank(self).cmp(&rank(other)).then_with(|| match (self, other) {
            (PropertyValue::Object(a), PropertyValue::Object(b))
            | (PropertyValue::Link(a), PropertyValue::Link(b)) => a.compare(b),
            (PropertyValue::Iri(a), PropertyValue::Iri(b)) => a.cmp(b),
            (PropertyValue::Scalar(a), PropertyValue::Scalar(b)) => a.compare(b),
            (PropertyValue::Unknown(a), PropertyValue::Unknown(b)) => {
                a.to_string().cmp(&b.to_string())
            }
            _ => Ordering::Equal,
        })
    }
}

/// Runs the codec of an IRI or bare scalar kind; `None` for the others.
fn parse_bare(kind: &Kind, raw: &Value) -> Option<Result<PropertyValue, FormatError>> {
    match kind {
        Kind::Iri => Some(vocab_scalars::iri::parse(raw).map(PropertyValue::Iri)),
        Kind::Scalar(k) if !k.is_map_shaped() => Some(Scalar::parse(*k, raw).map(PropertyValue::Scalar)),
        _ => None,
    }
}

fn map_shaped(spec: &PropertySpec) -> impl Iterator<Item = vocab_scalars::ScalarKind> + '_ {
    spec.kinds().iter().filter_map(|k| match k {
        Kind::Scalar(k) if k.is_map_shaped() => Some(*k),
        _ => None,
    })
}

impl From<Iri> for PropertyValue {
    fn from(iri: Iri) -> Self {
        PropertyValue::Iri(iri)
    }
}

impl From<Scalar> for PropertyValue {
    fn from(scalar: Scalar) -> Self {
        PropertyValue::Scalar(scalar)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Scalar(Scalar::from(s))
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Scalar(Scalar::from(s))
    }
}

/// Places the object under the alternative matching its schema's capability.
impl From<VocabularyObject> for PropertyValue {
    fn from(object: VocabularyObject) -> Self {
        match object.schema().capability() {
            Capability::Object => PropertyValue::Object(Box::new(object)),
            Capability::Link => PropertyValue::Link(Box::new(object)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{registry::TypeRegistry, schema::Schema};
    use serde_json::json;
    use std::sync::Arc;
    use vocab_scalars::ScalarKind;

    struct Fixture {
        registry: TypeRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let note = Schema::builder("Note", Capability::Object)
                .property(PropertySpec::functional("id").accepts([Kind::Iri]))
                .property(PropertySpec::list("content").accepts([Kind::STRING]))
                .property(PropertySpec::functional("published").accepts([Kind::DATE_TIME]))
                .build();
            let link = Schema::builder("Link", Capability::Link)
                .property(PropertySpec::functional("href").accepts([Kind::ANY_URI]))
                .build();
            let mut builder = TypeRegistry::builder();
            builder.register_schema(&note).unwrap();
            builder.register_schema(&link).unwrap();
            Self {
                registry: builder.freeze(),
            }
        }

        fn decode(&self, raw: Value, spec: &PropertySpec) -> Result<PropertyValue, CodecError> {
            PropertyValue::from_value(&raw, spec, &DecodeContext::new(&self.registry))
        }
    }

    fn reference() -> PropertySpec {
        PropertySpec::list("attributedTo").accepts([Kind::Iri, Kind::Object, Kind::Link])
    }

    #[test]
    fn test_typed_map_resolves_to_object() {
        let fx = Fixture::new();
        let value = fx
            .decode(json!({"type": "Note", "content": "hi"}), &reference())
            .unwrap();

        let note = value.as_object().unwrap();
        assert_eq!(note.type_name(), "Note");
        assert!(value.is_kind(Kind::Object));
    }

    #[test]
    fn test_resolution_follows_candidate_order() {
        let fx = Fixture::new();

        let value = fx
            .decode(json!({"type": ["Note", "Link"]}), &reference())
            .unwrap();
        assert!(value.as_object().is_some());

        let value = fx
            .decode(json!({"type": ["Link", "Note"]}), &reference())
            .unwrap();
        assert_eq!(value.as_link().unwrap().type_name(), "Link");
    }

    #[test]
    fn test_link_is_not_resolved_for_object_only_property() {
        let fx = Fixture::new();
        let spec = PropertySpec::list("object").accepts([Kind::Object, Kind::Iri]);

        let raw = json!({"type": "Link", "href": "https://example.com"});
        let value = fx.decode(raw.clone(), &spec).unwrap();
        assert_eq!(value, PropertyValue::Unknown(raw));
    }

    #[test]
    fn test_unregistered_type_is_kept_verbatim() {
        let fx = Fixture::new();
        let raw = json!({"type": "Hashtag", "name": "#rust"});
        let value = fx.decode(raw.clone(), &reference()).unwrap();
        assert!(value.is_unknown());
        assert_eq!(value.to_value(), raw);
    }

    #[test]
    fn test_untyped_map_is_kept_verbatim() {
        let fx = Fixture::new();
        let raw = json!({"href": "https://example.com"});
        assert_eq!(
            fx.decode(raw.clone(), &reference()).unwrap(),
            PropertyValue::Unknown(raw)
        );
    }

    #[test]
    fn test_map_for_scalar_only_property_fails() {
        let fx = Fixture::new();
        let spec = PropertySpec::functional("width").accepts([Kind::NON_NEGATIVE_INTEGER]);

        let err = fx.decode(json!({"value": 10}), &spec).unwrap_err();
        let CodecError::Format { property, source } = err else {
            panic!("expected a format error, got {err:?}");
        };
        assert_eq!(property, "width");
        assert_eq!(source.kind, ScalarKind::NonNegativeInteger);
        assert!(source.reason.contains("object"));

        // nested arrays fail the same way
        let spec = PropertySpec::list("href").accepts([Kind::Iri]);
        let err = fx.decode(json!(["https://example.com"]), &spec).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Format { source: FormatError { kind: ScalarKind::AnyUri, .. }, .. }
        ));
    }

    #[test]
    fn test_object_only_property_reports_shape() {
        let fx = Fixture::new();
        let spec = PropertySpec::functional("object")
            .accepts([Kind::Object])
            .on_unknown(UnknownPolicy::Reject);

        let err = fx.decode(json!(7), &spec).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnexpectedShape {
                property: "object".to_string(),
                found: "number",
            }
        );
    }

    #[test]
    fn test_scalars_tried_in_declared_order() {
        let fx = Fixture::new();
        let text = PropertySpec::list("name").accepts([Kind::STRING, Kind::LANG_STRING, Kind::Iri]);
        assert_eq!(
            fx.decode(json!("https://example.com"), &text).unwrap(),
            PropertyValue::from("https://example.com")
        );

        let iri_first = PropertySpec::list("url").accepts([Kind::Iri, Kind::STRING]);
        assert!(fx
            .decode(json!("https://example.com"), &iri_first)
            .unwrap()
            .as_iri()
            .is_some());
        assert!(fx
            .decode(json!("plain"), &iri_first)
            .unwrap()
            .as_string()
            .is_some());
    }

    #[test]
    fn test_lang_string_value_object() {
        let fx = Fixture::new();
        let text = PropertySpec::list("content").accepts([Kind::STRING, Kind::LANG_STRING]);
        let value = fx
            .decode(json!({"@value": "hola", "@language": "es"}), &text)
            .unwrap();
        assert!(value.is_kind(Kind::LANG_STRING));
        assert_eq!(value.as_str(), Some("hola"));
    }

    #[test]
    fn test_unmatched_scalar_for_text_property_is_kept() {
        let fx = Fixture::new();
        let text = PropertySpec::list("content").accepts([Kind::STRING]);
        assert_eq!(
            fx.decode(json!(42), &text).unwrap(),
            PropertyValue::Unknown(json!(42))
        );
    }

    #[test]
    fn test_unmatched_scalar_for_strict_property_fails() {
        let fx = Fixture::new();
        let spec = PropertySpec::functional("published").accepts([Kind::DATE_TIME, Kind::Iri]);

        let err = fx.decode(json!("not-a-date"), &spec).unwrap_err();
        assert!(matches!(err, CodecError::Format { ref property, .. } if property == "published"));
    }

    #[test]
    fn test_malformed_nested_object_propagates() {
        let fx = Fixture::new();
        let raw = json!({"type": "Note", "published": "yesterday"});

        let err = fx.decode(raw, &reference()).unwrap_err();
        match err {
            CodecError::Nested { property, source } => {
                assert_eq!(property, "attributedTo");
                assert!(matches!(*source, CodecError::Format { ref property, .. } if property == "published"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_identifier() {
        let fx = Fixture::new();
        let value = fx
            .decode(json!({"type": "Note", "id": "https://example.com/n/1"}), &reference())
            .unwrap();
        assert_eq!(value.identifier().unwrap().as_str(), "https://example.com/n/1");

        let value = fx.decode(json!("https://example.com/u/1"), &reference()).unwrap();
        assert_eq!(value.identifier().unwrap().as_str(), "https://example.com/u/1");
    }

    #[test]
    fn test_compare_orders_by_alternative() {
        let iri = PropertyValue::Iri(Iri::parse("https://example.com").unwrap());
        let text = PropertyValue::from("a");
        let opaque = PropertyValue::Unknown(json!(1));
        let note = Schema::builder("Note", Capability::Object).build();
        let object = PropertyValue::from(VocabularyObject::new(Arc::clone(&note)));

        assert_eq!(object.compare(&iri), Ordering::Less);
        assert_eq!(iri.compare(&text), Ordering::Less);
        assert_eq!(text.compare(&opaque), Ordering::Less);
        assert_eq!(text.compare(&PropertyValue::from("b")), Ordering::Less);
    }
}
