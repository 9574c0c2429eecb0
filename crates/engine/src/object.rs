//! The generic entity every vocabulary type is an instance of.
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use vocab_scalars::{Iri, Scalar};

use crate::{
    context::{DecodeContext, CONTEXT_KEY, TYPE_KEY},
    error::CodecError,
    functional::FunctionalSlot,
    kind::Kind,
    langmap::NaturalLanguageMap,
    list::PropertyList,
    schema::{PropertySpec, Schema, UnknownPolicy, WireKey},
    value::PropertyValue,
};

pub const ID_KEY: &str = "id";

// Type names are IRIs or bare terms; anything else is kept opaque.
static TYPE_SPEC: Lazy<PropertySpec> =
    Lazy::new(|| PropertySpec::list(TYPE_KEY).accepts([Kind::Iri, Kind::STRING]));

/// Storage for one property, shaped by its cardinality.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertySlot {
    List(PropertyList),
    Functional(FunctionalSlot),
}

impl PropertySlot {
    fn empty(spec: &PropertySpec) -> Self {
        if spec.is_functional() {
            PropertySlot::Functional(FunctionalSlot::new())
        } else {
            PropertySlot::List(PropertyList::new())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            PropertySlot::List(list) => list.is_empty(),
            PropertySlot::Functional(slot) => slot.is_empty(),
        }
    }

    /// Every held value, in order.
    pub fn values(&self) -> &[PropertyValue] {
        match self {
            PropertySlot::List(list) => list.as_slice(),
            PropertySlot::Functional(slot) => slot.as_slice(),
        }
    }

    pub fn to_value(&self) -> Option<Value> {
        match self {
            PropertySlot::List(list) => list.to_value(),
            PropertySlot::Functional(slot) => slot.to_value(),
        }
    }
}

/// An instance of a vocabulary type: its property values, its type
/// identity list, the per-language text maps and the wire keys its schema
/// does not know about.
#[derive(Debug, Clone)]
pub struct VocabularyObject {
    schema: Arc<Schema>,
    types: PropertyList,
    properties: HashMap<String, PropertySlot>,
    language_maps: HashMap<String, NaturalLanguageMap>,
    unknown: Map<String, Value>,
}

impl VocabularyObject {
    /// An empty instance whose type list already names the schema's type.
    pub fn new(schema: Arc<Schema>) -> Self {
        let mut object = Self::bare(schema);
        object.types.append(object.schema.type_name().to_string());
        object
    }

    fn bare(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            types: PropertyList::new(),
            properties: HashMap::new(),
            language_maps: HashMap::new(),
            unknown: Map::new(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The canonical type name.
    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    /// The `type` values carried by this instance.
    pub fn types(&self) -> &PropertyList {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut PropertyList {
        &mut self.types
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.as_str() == Some(name))
    }

    /// Appends a type name unless it is already listed.
    pub fn add_type(&mut self, name: &str) {
        if !self.has_type(name) {
            let value = Iri::parse(name)
                .map(PropertyValue::Iri)
                .unwrap_or_else(|_| PropertyValue::from(name));
            self.types.append(value);
        }
    }

    fn spec(&self, name: &str) -> Result<&PropertySpec, CodecError> {
        self.schema
            .property(name)
            .ok_or_else(|| CodecError::UnknownProperty {
                type_name: self.type_name().to_string(),
                property: name.to_string(),
            })
    }

    pub fn id(&self) -> Option<&Iri> {
        self.functional(ID_KEY).and_then(FunctionalSlot::get_iri)
    }

    pub fn set_id(&mut self, id: Iri) -> Result<(), CodecError> {
        self.set(ID_KEY, id)
    }

    pub fn property(&self, name: &str) -> Option<&PropertySlot> {
        self.properties.get(name)
    }

    pub fn list(&self, name: &str) -> Option<&PropertyList> {
        match self.properties.get(name) {
            Some(PropertySlot::List(list)) => Some(list),
            _ => None,
        }
    }

    pub fn functional(&self, name: &str) -> Option<&FunctionalSlot> {
        match self.properties.get(name) {
            Some(PropertySlot::Functional(slot)) => Some(slot),
            _ => None,
        }
    }

    /// The value of a functional property.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.functional(name).and_then(FunctionalSlot::get)
    }

    fn slot_mut(&mut self, name: &str) -> Result<&mut PropertySlot, CodecError> {
        let spec = self.spec(name)?;
        let slot = PropertySlot::empty(spec);
        let key = spec.name().to_string();
        Ok(self.properties.entry(key).or_insert(slot))
    }

    pub fn list_mut(&mut self, name: &str) -> Result<&mut PropertyList, CodecError> {
        match self.slot_mut(name)? {
            PropertySlot::List(list) => Ok(list),
            PropertySlot::Functional(_) => Err(CodecError::CardinalityMismatch {
                property: name.to_string(),
                expected: crate::schema::Cardinality::Functional,
            }),
        }
    }

    pub fn functional_mut(&mut self, name: &str) -> Result<&mut FunctionalSlot, CodecError> {
        match self.slot_mut(name)? {
            PropertySlot::Functional(slot) => Ok(slot),
            PropertySlot::List(_) => Err(CodecError::CardinalityMismatch {
                property: name.to_string(),
                expected: crate::schema::Cardinality::NonFunctional,
            }),
        }
    }

    fn check_kind(&self, name: &str, value: &PropertyValue) -> Result<(), CodecError> {
        let spec = self.spec(name)?;
        let allowed = match value.kind() {
            Some(kind) => spec.allows(kind),
            None => spec.unknown_policy() == UnknownPolicy::Retain,
        };
        if allowed {
            Ok(())
        } else {
            Err(CodecError::KindNotAllowed {
                property: name.to_string(),
                kind: value
                    .kind()
                    .map_or_else(|| "unknown data".to_string(), |k| k.to_string()),
            })
        }
    }

    /// Sets a functional property, checking the value's kind is declared.
    pub fn set(&mut self, name: &str, value: impl Into<PropertyValue>) -> Result<(), CodecError> {
        let value = value.into();
        self.check_kind(name, &value)?;
        self.functional_mut(name)?.set(value);
        Ok(())
    }

    /// Appends to a non-functional property, checking the value's kind is declared.
    pub fn append(&mut self, name: &str, value: impl Into<PropertyValue>) -> Result<(), CodecError> {
        let value = value.into();
        self.check_kind(name, &value)?;
        self.list_mut(name)?.append(value);
        Ok(())
    }

    /// Drops every plain value of the property; its language map is kept.
    pub fn clear(&mut self, name: &str) {
        self.properties.remove(name);
    }

    pub fn language_map(&self, name: &str) -> Option<&NaturalLanguageMap> {
        self.language_maps.get(name)
    }

    pub fn language_map_mut(&mut self, name: &str) -> Result<&mut NaturalLanguageMap, CodecError> {
        let spec = self.spec(name)?;
        if !spec.has_language_map() {
            return Err(CodecError::KindNotAllowed {
                property: name.to_string(),
                kind: Kind::LANG_STRING.to_string(),
            });
        }
        let key = spec.name().to_string();
        Ok(self.language_maps.entry(key).or_default())
    }

    pub fn clear_language_map(&mut self, name: &str) -> Option<NaturalLanguageMap> {
        self.language_maps.remove(name)
    }

    /// Language tags of the property's map; `None` when no map is present,
    /// an empty list when the map is present but empty.
    pub fn languages(&self, name: &str) -> Option<Vec<&str>> {
        self.language_maps.get(name).map(NaturalLanguageMap::languages)
    }

    /// Text of a natural-language property.
    ///
    /// With a language, the language map answers first, then a plain value
    /// tagged with that language, then the first untagged plain string.
    /// Without one, only the plain values are consulted.
    pub fn text(&self, name: &str, language: Option<&str>) -> Option<&str> {
        let values = self
            .properties
            .get(name)
            .map(PropertySlot::values)
            .unwrap_or_default();

        if let Some(language) = language {
            if let Some(map) = self.language_maps.get(name) {
                if map.has_language(language) {
                    return Some(map.get(language));
                }
            }
            let tagged = values.iter().find_map(|v| match v {
                PropertyValue::Scalar(Scalar::LangString(ls))
                    if ls.language.as_ref().is_some_and(|t| t.as_str() == language) =>
                {
                    Some(ls.value.as_str())
                }
                _ => None,
            });
            if tagged.is_some() {
                return tagged;
            }
        }

        values.iter().find_map(PropertyValue::as_string)
    }

    /// Wire keys the schema does not declare, kept verbatim.
    pub fn unknown(&self) -> &Map<String, Value> {
        &self.unknown
    }

    pub fn set_unknown(&mut self, key: impl Into<String>, value: Value) {
        self.unknown.insert(key.into(), value);
    }

    pub fn remove_unknown(&mut self, key: &str) -> Option<Value> {
        self.unknown.remove(key)
    }

    /// Encodes the object.
    ///
    /// The type list is emitted with the canonical type name exactly once:
    /// appended when missing, repeats after the first dropped.
    /// Declared properties follow in schema order, each language map right
    /// after its property, then the unknown keys.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();

        let mut types = PropertyList::new();
        let mut canonical_seen = false;
        for value in &self.types {
            if value.as_str() == Some(self.type_name()) {
                if canonical_seen {
                    continue;
                }
                canonical_seen = true;
            }
            types.append(value.clone());
        }
        if !canonical_seen {
            types.append(self.type_name().to_string());
        }
        if let Some(value) = types.to_value() {
            map.insert(TYPE_KEY.to_string(), value);
        }

        for spec in self.schema.properties() {
            if let Some(value) = self.properties.get(spec.name()).and_then(PropertySlot::to_value) {
                map.insert(spec.name().to_string(), value);
            }
            if let (Some(key), Some(lang)) = (spec.language_map_key(), self.language_maps.get(spec.name())) {
                map.insert(key, lang.to_value());
            }
        }

        for (key, value) in &self.unknown {
            if !map.contains_key(key) {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Decodes `map` as an instance of `schema`.
    ///
    /// `@context` is read for prefix bindings and otherwise dropped. Keys
    /// the schema does not declare land in [`VocabularyObject::unknown`].
    pub fn from_map(
        schema: Arc<Schema>,
        map: &Map<String, Value>,
        ctx: &DecodeContext<'_>,
    ) -> Result<Self, CodecError> {
        let ctx = ctx.enter(map);
        let mut object = Self::bare(Arc::clone(&schema));

        for (key, raw) in map {
            if key == CONTEXT_KEY {
                continue;
            }

            let term = ctx.normalize(key);
            if term == TYPE_KEY {
                let normalized = normalize_types(raw, &ctx);
                object.types = PropertyList::from_value(&normalized, &TYPE_SPEC, &ctx)?;
                continue;
            }

            match schema.wire_key(term) {
                // Several wire keys may alias one property (`content`,
                // `as:content`). List values are merged in key order; a
                // second functional value or language map stays unknown.
                Some(WireKey::Value(spec)) => match object.properties.get_mut(spec.name()) {
                    Some(PropertySlot::List(list)) => {
                        list.extend(PropertyList::from_value(raw, spec, &ctx)?);
                    }
                    Some(PropertySlot::Functional(_)) => {
                        tracing::debug!("{key} repeats functional property {}", spec.name());
                        object.unknown.insert(key.clone(), raw.clone());
                    }
                    None => {
                        let slot = if spec.is_functional() {
                            PropertySlot::Functional(FunctionalSlot::from_value(raw, spec, &ctx)?)
                        } else {
                            PropertySlot::List(PropertyList::from_value(raw, spec, &ctx)?)
                        };
                        object.properties.insert(spec.name().to_string(), slot);
                    }
                },
                Some(WireKey::LanguageMap(spec)) if object.language_maps.contains_key(spec.name()) => {
                    tracing::debug!("{key} repeats language map of {}", spec.name());
                    object.unknown.insert(key.clone(), raw.clone());
                }
                Some(WireKey::LanguageMap(spec)) => match NaturalLanguageMap::from_value(raw) {
                    Ok(lang) => {
                        object.language_maps.insert(spec.name().to_string(), lang);
                    }
                    Err(source) => match spec.unknown_policy() {
                        UnknownPolicy::Retain => {
                            tracing::trace!("keeping malformed language map {key}");
                            object.unknown.insert(key.clone(), raw.clone());
                        }
                        UnknownPolicy::Reject => {
                            return Err(CodecError::Format {
                                property: key.clone(),
                                source,
                            })
                        }
                    },
                },
                None => {
                    object.unknown.insert(key.clone(), raw.clone());
                }
            }
        }

        Ok(object)
    }

    /// Orders by `id`, objects without one first, then by type name.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.id()
            .cmp(&other.id())
            .then_with(|| self.type_name().cmp(other.type_name()))
    }

    fn populated(&self) -> BTreeMap<&str, &PropertySlot> {
        self.properties
            .iter()
            .filter(|(_, slot)| !slot.is_empty())
            .map(|(name, slot)| (name.as_str(), slot))
            .collect()
    }
}

fn normalize_types(raw: &Value, ctx: &DecodeContext<'_>) -> Value {
    match raw {
        Value::String(name) => Value::String(ctx.normalize(name).to_string()),
        Value::Array(items) => Value::Array(items.iter().map(|item| normalize_types(item, ctx)).collect()),
        other => other.clone(),
    }
}

/// Empty properties compare equal to absent ones.
impl PartialEq for VocabularyObject {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name()
            && self.types == other.types
            && self.populated() == other.populated()
            && self.language_maps == other.language_maps
            && self.unknown == other.unknown
    }
}

impl Serialize for VocabularyObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}
