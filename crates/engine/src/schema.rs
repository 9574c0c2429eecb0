//! Property declarations and the per-type schemas built from them.
//!
//! A vocabulary type is nothing but a [`Schema`]: a type name, the
//! capability it is registered under and the ordered set of properties it
//! carries. Schemas inherit the properties of the schemas they extend.
use std::{fmt, sync::Arc};

use crate::{kind::Kind, registry::Capability};

/// Suffix of the wire key carrying the per-language variants of a property.
pub const LANGUAGE_MAP_SUFFIX: &str = "Map";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Zero or one value.
    Functional,
    /// An ordered list of values.
    NonFunctional,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Functional => f.write_str("functional"),
            Cardinality::NonFunctional => f.write_str("non-functional"),
        }
    }
}

/// What happens to a wire value that no declared kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownPolicy {
    /// Keep it verbatim as an opaque value.
    Retain,
    /// Fail the enclosing decode with a format error.
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    name: String,
    cardinality: Cardinality,
    kinds: Vec<Kind>,
    language_map: bool,
    unknown: Option<UnknownPolicy>,
}

impl PropertySpec {
    pub fn functional(name: impl Into<String>) -> Self {
        Self::new(name.into(), Cardinality::Functional)
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self::new(name.into(), Cardinality::NonFunctional)
    }

    fn new(name: String, cardinality: Cardinality) -> Self {
        Self {
            name,
            cardinality,
            kinds: Vec::new(),
            language_map: false,
            unknown: None,
        }
    }

    /// Appends accepted kinds. Declaration order is decode priority order.
    pub fn accepts(mut self, kinds: impl IntoIterator<Item = Kind>) -> Self {
        for kind in kinds {
            if !self.kinds.contains(&kind) {
                self.kinds.push(kind);
            }
        }
        self
    }

    /// Pairs the property with a `<name>Map` natural-language map.
    pub fn with_language_map(mut self) -> Self {
        self.language_map = true;
        self
    }

    pub fn on_unknown(mut self, policy: UnknownPolicy) -> Self {
        self.unknown = Some(policy);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_functional(&self) -> bool {
        self.cardinality == Cardinality::Functional
    }

    pub fn kinds(&self) -> &[Kind] {
        &self.kinds
    }

    pub fn allows(&self, kind: Kind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn has_language_map(&self) -> bool {
        self.language_map
    }

    /// Wire key of the natural-language map, if the property has one.
    pub fn language_map_key(&self) -> Option<String> {
        self.language_map
            .then(|| format!("{}{LANGUAGE_MAP_SUFFIX}", self.name))
    }

    /// Unless set explicitly, properties that can hold typed values or free
    /// text retain unclassifiable data; purely numeric, temporal and other
    /// strictly-formatted properties reject it.
    pub fn unknown_policy(&self) -> UnknownPolicy {
        self.unknown.unwrap_or_else(|| {
            let lenient = self
                .kinds
                .iter()
                .any(|k| k.is_typed() || matches!(*k, Kind::STRING | Kind::LANG_STRING));
            if lenient {
                UnknownPolicy::Retain
            } else {
                UnknownPolicy::Reject
            }
        })
    }
}

/// Which physical wire key of a property was matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireKey<'a> {
    Value(&'a PropertySpec),
    LanguageMap(&'a PropertySpec),
}

#[derive(Debug, PartialEq)]
pub struct Schema {
    type_name: String,
    capability: Capability,
    ancestors: Vec<String>,
    properties: Vec<PropertySpec>,
}

impl Schema {
    pub fn builder(type_name: impl Into<String>, capability: Capability) -> SchemaBuilder {
        SchemaBuilder {
            schema: Schema {
                type_name: type_name.into(),
                capability,
                ancestors: Vec::new(),
                properties: Vec::new(),
            },
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Every type this one extends, nearest first.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Finds the property a wire key belongs to, either as its value key or
    /// as its `<name>Map` key.
    pub fn wire_key(&self, key: &str) -> Option<WireKey<'_>> {
        if let Some(spec) = self.property(key) {
            return Some(WireKey::Value(spec));
        }

        let base = key.strip_suffix(LANGUAGE_MAP_SUFFIX)?;
        self.property(base)
            .filter(|spec| spec.language_map)
            .map(WireKey::LanguageMap)
    }
}

pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Inherits the parent's properties and ancestry.
    pub fn extends(mut self, parent: &Schema) -> Self {
        self.schema.ancestors.push(parent.type_name.clone());
        self.schema
            .ancestors
            .extend(parent.ancestors.iter().cloned());
        for spec in &parent.properties {
            self = self.property(spec.clone());
        }
        self
    }

    /// Adds a property, replacing any inherited one of the same name.
    pub fn property(mut self, spec: PropertySpec) -> Self {
        match self.schema.properties.iter_mut().find(|p| p.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.schema.properties.push(spec),
        }
        self
    }

    pub fn build(self) -> Arc<Schema> {
        Arc::new(self.schema)
    }
}
