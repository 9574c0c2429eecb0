use serde_json::Value;
use vocab_scalars::{describe, Iri, Scalar};

use crate::{
    context::DecodeContext,
    error::CodecError,
    kind::Kind,
    object::VocabularyObject,
    schema::{PropertySpec, UnknownPolicy},
    value::PropertyValue,
};

/// The zero-or-one value of a functional property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionalSlot {
    value: Option<PropertyValue>,
}

impl FunctionalSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn get(&self) -> Option<&PropertyValue> {
        self.value.as_ref()
    }

    /// Replaces whatever alternative was held.
    pub fn set(&mut self, value: impl Into<PropertyValue>) {
        self.value = Some(value.into());
    }

    pub fn as_slice(&self) -> &[PropertyValue] {
        self.value.as_slice()
    }

    pub fn set_unknown(&mut self, raw: Value) {
        self.value = Some(PropertyValue::Unknown(raw));
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn take(&mut self) -> Option<PropertyValue> {
        self.value.take()
    }

    pub fn kind(&self) -> Option<Kind> {
        self.value.as_ref().and_then(PropertyValue::kind)
    }

    pub fn is_kind(&self, kind: Kind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn has_unknown(&self) -> bool {
        self.value.as_ref().is_some_and(PropertyValue::is_unknown)
    }

    pub fn unknown(&self) -> Option<&Value> {
        self.value.as_ref().and_then(PropertyValue::as_unknown)
    }

    pub fn get_object(&self) -> Option<&VocabularyObject> {
        self.value.as_ref().and_then(PropertyValue::as_object)
    }

    pub fn get_link(&self) -> Option<&VocabularyObject> {
        self.value.as_ref().and_then(PropertyValue::as_link)
    }

    pub fn get_iri(&self) -> Option<&Iri> {
        self.value.as_ref().and_then(PropertyValue::as_iri)
    }

    pub fn get_scalar(&self) -> Option<&Scalar> {
        self.value.as_ref().and_then(PropertyValue::as_scalar)
    }

    pub fn to_value(&self) -> Option<Value> {
        self.value.as_ref().map(PropertyValue::to_value)
    }

    /// A one-element array is read as its element, for peers that array
    /// every value. Other arrays are opaque.
    pub fn from_value(
        raw: &Value,
        spec: &PropertySpec,
        ctx: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        let value = match raw {
            Value::Array(items) if items.len() == 1 => PropertyValue::from_value(&items[0], spec, ctx)?,
            Value::Array(_) => match spec.unknown_policy() {
                UnknownPolicy::Retain => PropertyValue::Unknown(raw.clone()),
                UnknownPolicy::Reject => {
                    return Err(CodecError::UnexpectedShape {
                        property: spec.name().to_string(),
                        found: describe(raw),
                    })
                }
            },
            single => PropertyValue::from_value(single, spec, ctx)?,
        };
        Ok(Self { value: Some(value) })
    }
}

impl From<PropertyValue> for FunctionalSlot {
    fn from(value: PropertyValue) -> Self {
        Self { value: Some(value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use serde_json::json;

    #[test]
    fn test_set_replaces_alternative() {
        let mut slot = FunctionalSlot::new();
        assert!(slot.is_empty());

        slot.set(Iri::parse("https://example.com/a").unwrap());
        assert!(slot.is_kind(Kind::Iri));

        slot.set("text");
        assert!(slot.is_kind(Kind::STRING));
        assert!(slot.get_iri().is_none());

        slot.set_unknown(json!([1, 2]));
        assert!(slot.has_unknown());
        assert_eq!(slot.kind(), None);

        slot.clear();
        assert_eq!(slot.to_value(), None);
    }

    #[test]
    fn test_single_element_array_is_unwrapped() {
        let registry = TypeRegistry::builder().freeze();
        let ctx = DecodeContext::new(&registry);
        let spec = PropertySpec::functional("mediaType").accepts([Kind::MEDIA_TYPE]);

        let slot = FunctionalSlot::from_value(&json!(["text/html"]), &spec, &ctx).unwrap();
        assert_eq!(slot.to_value(), Some(json!("text/html")));
    }

    #[test]
    fn test_multi_element_array() {
        let registry = TypeRegistry::builder().freeze();
        let ctx = DecodeContext::new(&registry);

        let strict = PropertySpec::functional("mediaType").accepts([Kind::MEDIA_TYPE]);
        let err = FunctionalSlot::from_value(&json!(["text/html", "text/plain"]), &strict, &ctx)
            .unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedShape { found: "array", .. }));

        let lenient = PropertySpec::functional("object").accepts([Kind::Iri, Kind::Object]);
        let raw = json!(["https://example.com/a", "https://example.com/b"]);
        let slot = FunctionalSlot::from_value(&raw, &lenient, &ctx).unwrap();
        assert_eq!(slot.unknown(), Some(&raw));
    }
}
