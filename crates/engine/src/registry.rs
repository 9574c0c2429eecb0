//! The open table of vocabulary types, keyed by type name.
//!
//! Registration happens on a [`TypeRegistryBuilder`]; [`TypeRegistryBuilder::freeze`]
//! turns it into a read-only [`TypeRegistry`] that can be shared across
//! threads. A frozen registry has no way to accept new entries.
use std::{collections::HashMap, fmt, sync::Arc};

use serde_json::{Map, Value};

use crate::{
    context::DecodeContext, error::CodecError, error::RegistryError, object::VocabularyObject,
    schema::Schema,
};

/// The resolver table a type participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Object,
    Link,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Object => f.write_str("object"),
            Capability::Link => f.write_str("link"),
        }
    }
}

/// Builds a concrete vocabulary value from its wire map.
pub trait TypeConstructor: fmt::Debug + Send + Sync {
    /// The canonical type name.
    fn type_name(&self) -> &str;

    /// Names of every type this one extends, nearest first.
    fn ancestors(&self) -> &[String] {
        &[]
    }

    fn deserialize(
        &self,
        map: &Map<String, Value>,
        ctx: &DecodeContext<'_>,
    ) -> Result<VocabularyObject, CodecError>;
}

impl TypeConstructor for Arc<Schema> {
    fn type_name(&self) -> &str {
        Schema::type_name(self)
    }

    fn ancestors(&self) -> &[String] {
        Schema::ancestors(self)
    }

    fn deserialize(
        &self,
        map: &Map<String, Value>,
        ctx: &DecodeContext<'_>,
    ) -> Result<VocabularyObject, CodecError> {
        VocabularyObject::from_map(Arc::clone(self), map, ctx)
    }
}

type Table = HashMap<String, Arc<dyn TypeConstructor>>;

#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    objects: Table,
    links: Table,
    namespaces: Vec<String>,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        capability: Capability,
        constructor: Arc<dyn TypeConstructor>,
    ) -> Result<&mut Self, RegistryError> {
        let name = constructor.type_name().to_string();
        let table = match capability {
            Capability::Object => &mut self.objects,
            Capability::Link => &mut self.links,
        };

        if table.contains_key(&name) {
            tracing::error!("found duplicate entry in {capability} registry: {name}");
            return Err(RegistryError::DuplicateEntry(name));
        }

        tracing::debug!("registering {capability} type: {name}");
        table.insert(name, constructor);
        Ok(self)
    }

    /// Registers a schema under the capability it declares.
    pub fn register_schema(&mut self, schema: &Arc<Schema>) -> Result<&mut Self, RegistryError> {
        self.register(schema.capability(), Arc::new(Arc::clone(schema)))
    }

    /// Declares a vocabulary namespace IRI. Prefixes bound to it in an
    /// incoming `@context` are stripped from keys and type names.
    pub fn namespace(&mut self, iri: impl Into<String>) -> &mut Self {
        let iri = iri.into();
        if !self.namespaces.contains(&iri) {
            self.namespaces.push(iri);
        }
        self
    }

    pub fn freeze(self) -> TypeRegistry {
        tracing::info!(
            "type registry frozen with {} object and {} link types",
            self.objects.len(),
            self.links.len()
        );
        TypeRegistry {
            objects: self.objects,
            links: self.links,
            namespaces: self.namespaces,
        }
    }
}

/// A frozen, read-only type table.
pub struct TypeRegistry {
    objects: Table,
    links: Table,
    namespaces: Vec<String>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut objects: Vec<_> = self.objects.keys().collect();
        let mut links: Vec<_> = self.links.keys().collect();
        objects.sort();
        links.sort();
        f.debug_struct("TypeRegistry")
            .field("objects", &objects)
            .field("links", &links)
            .field("namespaces", &self.namespaces)
            .finish()
    }
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    pub fn resolve_object(&self, type_name: &str) -> Option<&Arc<dyn TypeConstructor>> {
        self.objects.get(type_name)
    }

    pub fn resolve_link(&self, type_name: &str) -> Option<&Arc<dyn TypeConstructor>> {
        self.links.get(type_name)
    }

    /// Walks `candidates` in order and returns the first one registered under
    /// any of the allowed capabilities. For a single candidate, the object
    /// table is consulted before the link table.
    pub fn resolve<S: AsRef<str>>(
        &self,
        candidates: &[S],
        allowed: &[Capability],
    ) -> Option<(Capability, &Arc<dyn TypeConstructor>)> {
        candidates.iter().find_map(|name| {
            let name = name.as_ref();
            [Capability::Object, Capability::Link]
                .into_iter()
                .filter(|c| allowed.contains(c))
                .find_map(|c| self.table(c).get(name).map(|ctor| (c, ctor)))
        })
    }

    fn table(&self, capability: Capability) -> &Table {
        match capability {
            Capability::Object => &self.objects,
            Capability::Link => &self.links,
        }
    }

    fn lookup(&self, type_name: &str) -> Option<&Arc<dyn TypeConstructor>> {
        self.objects
            .get(type_name)
            .or_else(|| self.links.get(type_name))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.lookup(type_name).is_some()
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    /// Whether `type_name` is `ancestor` or inherits from it.
    pub fn is_or_extends(&self, type_name: &str, ancestor: &str) -> bool {
        type_name == ancestor
            || self
                .lookup(type_name)
                .is_some_and(|ctor| ctor.ancestors().iter().any(|a| a == ancestor))
    }

    /// Names of every registered type that extends `ancestor`, sorted.
    pub fn extended_by(&self, ancestor: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .objects
            .values()
            .chain(self.links.values())
            .filter(|ctor| ctor.ancestors().iter().any(|a| a == ancestor))
            .map(|ctor| ctor.type_name())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Decodes a top-level wire value into the type its own `type` key names.
    pub fn to_object(&self, value: &Value) -> Result<VocabularyObject, CodecError> {
        let Value::Object(map) = value else {
            return Err(CodecError::NotAnObject(vocab_scalars::describe(value)));
        };

        let ctx = DecodeContext::new(self).enter(map);
        let candidates = ctx.type_candidates(map);
        if candidates.is_empty() {
            return Err(CodecError::MissingType);
        }

        match self.resolve(candidates.as_slice(), &[Capability::Object, Capability::Link]) {
            Some((_, ctor)) => ctor.deserialize(map, &ctx),
            None => {
                tracing::debug!("no registered type among {candidates:?}");
                Err(CodecError::UnhandledType(candidates))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kind::Kind, schema::PropertySpec};
    use serde_json::json;

    fn schemas() -> (Arc<Schema>, Arc<Schema>, Arc<Schema>) {
        let object = Schema::builder("Object", Capability::Object)
            .property(PropertySpec::list("content").accepts([Kind::STRING]))
            .build();
        let note = Schema::builder("Note", Capability::Object)
            .extends(&object)
            .build();
        let link = Schema::builder("Link", Capability::Link)
            .property(PropertySpec::functional("href").accepts([Kind::ANY_URI]))
            .build();
        (object, note, link)
    }

    fn registry() -> TypeRegistry {
        let (object, note, link) = schemas();
        let mut builder = TypeRegistry::builder();
        builder
            .register_schema(&object)
            .unwrap()
            .register_schema(&note)
            .unwrap()
            .register_schema(&link)
            .unwrap();
        builder.freeze()
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let (object, ..) = schemas();
        let mut builder = TypeRegistry::builder();
        builder.register_schema(&object).unwrap();

        let err = builder.register_schema(&object).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateEntry("Object".to_string()));
    }

    #[test]
    fn test_resolve_by_capability() {
        let registry = registry();
        assert!(registry.resolve_object("Note").is_some());
        assert!(registry.resolve_link("Note").is_none());
        assert!(registry.resolve_link("Link").is_some());
        assert!(registry.resolve_object("Unheard").is_none());
    }

    #[test]
    fn test_first_registered_candidate_wins() {
        let registry = registry();
        let all = [Capability::Object, Capability::Link];

        let (capability, ctor) = registry.resolve(&["Unheard", "Note", "Link"], &all).unwrap();
        assert_eq!(capability, Capability::Object);
        assert_eq!(ctor.type_name(), "Note");

        let (capability, ctor) = registry.resolve(&["Link", "Note"], &all).unwrap();
        assert_eq!(capability, Capability::Link);
        assert_eq!(ctor.type_name(), "Link");

        let (capability, _) = registry
            .resolve(&["Link", "Note"], &[Capability::Object])
            .unwrap();
        assert_eq!(capability, Capability::Object);

        assert!(registry.resolve(&["Unheard"], &all).is_none());
    }

    #[test]
    fn test_type_hierarchy() {
        let registry = registry();
        assert!(registry.is_or_extends("Note", "Object"));
        assert!(registry.is_or_extends("Note", "Note"));
        assert!(!registry.is_or_extends("Link", "Object"));
        assert_eq!(registry.extended_by("Object"), ["Note"]);
    }

    #[test]
    fn test_to_object() {
        let registry = registry();
        let note = registry
            .to_object(&json!({"type": "Note", "content": "hi"}))
            .unwrap();
        assert_eq!(note.type_name(), "Note");

        assert_eq!(
            registry.to_object(&json!({"content": "hi"})).unwrap_err(),
            CodecError::MissingType
        );
        assert_eq!(
            registry.to_object(&json!({"type": ["Unheard", "Other"]})).unwrap_err(),
            CodecError::UnhandledType(vec!["Unheard".to_string(), "Other".to_string()])
        );
        assert_eq!(
            registry.to_object(&json!("Note")).unwrap_err(),
            CodecError::NotAnObject("string")
        );
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = Arc::new(registry());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.resolve_object("Note").is_some())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
