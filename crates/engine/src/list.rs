use serde_json::Value;
use vocab_scalars::{Iri, Scalar};

use crate::{
    context::DecodeContext, error::CodecError, kind::Kind, object::VocabularyObject,
    schema::PropertySpec, value::PropertyValue,
};

/// The ordered values of a non-functional property.
///
/// Values that could not be classified are kept in place as
/// [`PropertyValue::Unknown`] entries, so decoding and re-encoding preserves
/// the producer's order. [`PropertyList::unknown`] scans from the front and
/// reports the earliest such entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyList {
    values: Vec<PropertyValue>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyValue> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[PropertyValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&PropertyValue> {
        self.values.get(index)
    }

    pub fn first(&self) -> Option<&PropertyValue> {
        self.values.first()
    }

    pub fn append(&mut self, value: impl Into<PropertyValue>) {
        self.values.push(value.into());
    }

    /// Inserts at the front, shifting every other value one position back.
    pub fn prepend(&mut self, value: impl Into<PropertyValue>) {
        self.values.insert(0, value.into());
    }

    /// Inserts before `index`; an index past the end appends.
    pub fn insert(&mut self, index: usize, value: impl Into<PropertyValue>) {
        let index = index.min(self.values.len());
        self.values.insert(index, value.into());
    }

    /// Replaces the value at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.values
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, value.into()))
    }

    /// Removes the value at `index`; later values shift left keeping their order.
    pub fn remove_at(&mut self, index: usize) -> Option<PropertyValue> {
        (index < self.values.len()).then(|| self.values.remove(index))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn append_unknown(&mut self, raw: Value) {
        self.values.push(PropertyValue::Unknown(raw));
    }

    pub fn has_unknown(&self) -> bool {
        self.values.iter().any(PropertyValue::is_unknown)
    }

    /// The earliest opaque entry.
    pub fn unknown(&self) -> Option<&Value> {
        self.values.iter().find_map(PropertyValue::as_unknown)
    }

    pub fn kind_at(&self, index: usize) -> Option<Kind> {
        self.get(index).and_then(PropertyValue::kind)
    }

    pub fn is_kind_at(&self, index: usize, kind: Kind) -> bool {
        self.kind_at(index) == Some(kind)
    }

    pub fn is_object_at(&self, index: usize) -> bool {
        self.is_kind_at(index, Kind::Object)
    }

    pub fn get_object_at(&self, index: usize) -> Option<&VocabularyObject> {
        self.get(index).and_then(PropertyValue::as_object)
    }

    pub fn is_link_at(&self, index: usize) -> bool {
        self.is_kind_at(index, Kind::Link)
    }

    pub fn get_link_at(&self, index: usize) -> Option<&VocabularyObject> {
        self.get(index).and_then(PropertyValue::as_link)
    }

    pub fn is_iri_at(&self, index: usize) -> bool {
        self.is_kind_at(index, Kind::Iri)
    }

    pub fn get_iri_at(&self, index: usize) -> Option<&Iri> {
        self.get(index).and_then(PropertyValue::as_iri)
    }

    pub fn is_string_at(&self, index: usize) -> bool {
        self.is_kind_at(index, Kind::STRING)
    }

    pub fn get_string_at(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(PropertyValue::as_string)
    }

    pub fn get_scalar_at(&self, index: usize) -> Option<&Scalar> {
        self.get(index).and_then(PropertyValue::as_scalar)
    }

    pub fn is_unknown_at(&self, index: usize) -> bool {
        self.get(index).is_some_and(PropertyValue::is_unknown)
    }

    /// Stable sort by [`PropertyValue::compare`].
    pub fn sort(&mut self) {
        self.values.sort_by(PropertyValue::compare);
    }

    /// Wire form: `None` when empty, the bare value for a single entry, an
    /// array otherwise.
    pub fn to_value(&self) -> Option<Value> {
        match self.values.as_slice() {
            [] => None,
            [single] => Some(single.to_value()),
            many => Some(Value::Array(many.iter().map(PropertyValue::to_value).collect())),
        }
    }

    /// Decodes a bare value as a single entry and an array element-wise.
    pub fn from_value(
        raw: &Value,
        spec: &PropertySpec,
        ctx: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        let values = match raw {
            Value::Array(items) => items
                .iter()
                .map(|item| PropertyValue::from_value(item, spec, ctx))
                .collect::<Result<Vec<_>, _>>()?,
            single => vec![PropertyValue::from_value(single, spec, ctx)?],
        };
        Ok(Self { values })
    }
}

impl<'a> IntoIterator for &'a PropertyList {
    type Item = &'a PropertyValue;
    type IntoIter = std::slice::Iter<'a, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<V: Into<PropertyValue>> Extend<V> for PropertyList {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.values.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for PropertyList {
    type Item = PropertyValue;
    type IntoIter = std::vec::IntoIter<PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<V: Into<PropertyValue>> FromIterator<V> for PropertyList {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}
