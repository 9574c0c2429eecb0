//! Decode-time state: the registry in use and the JSON-LD prefixes that an
//! incoming `@context` binds to a known vocabulary namespace.
//!
//! The `@context` value is only read here. It is never stored on a decoded
//! object.
use serde_json::{Map, Value};

use crate::registry::TypeRegistry;

pub const CONTEXT_KEY: &str = "@context";
pub const TYPE_KEY: &str = "type";

#[derive(Debug, Clone)]
pub struct DecodeContext<'a> {
    registry: &'a TypeRegistry,
    // Ordered, deduplicated; each entry ends with ':' or with the namespace separator.
    prefixes: Vec<String>,
}

impl<'a> DecodeContext<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        let mut prefixes = Vec::new();
        for ns in registry.namespaces() {
            let base = trim_namespace(ns);
            for separator in ["#", "/"] {
                let full = format!("{base}{separator}");
                if !prefixes.contains(&full) {
                    prefixes.push(full);
                }
            }
        }
        Self { registry, prefixes }
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Returns the context to decode `map` with, taking its own `@context`
    /// into account.
    pub fn enter(&self, map: &Map<String, Value>) -> DecodeContext<'a> {
        let mut ctx = self.clone();
        if let Some(context) = map.get(CONTEXT_KEY) {
            ctx.scan(context);
        }
        ctx
    }

    fn scan(&mut self, context: &Value) {
        match context {
            Value::Array(items) => items.iter().for_each(|item| self.scan(item)),
            Value::Object(terms) => {
                for (term, definition) in terms {
                    let iri = match definition {
                        Value::String(iri) => iri.as_str(),
                        Value::Object(def) => match def.get("@id") {
                            Some(Value::String(iri)) => iri.as_str(),
                            _ => continue,
                        },
                        _ => continue,
                    };

                    if term.starts_with('@') || !self.is_known_namespace(iri) {
                        continue;
                    }

                    let prefix = format!("{term}:");
                    if !self.prefixes.contains(&prefix) {
                        tracing::trace!("binding prefix {prefix} to {iri}");
                        self.prefixes.push(prefix);
                    }
                }
            }
            // A bare IRI only names a remote context.
            _ => {}
        }
    }

    fn is_known_namespace(&self, iri: &str) -> bool {
        let iri = trim_namespace(iri);
        self.registry
            .namespaces()
            .iter()
            .any(|ns| trim_namespace(ns) == iri)
    }

    /// Strips a bound prefix or a full namespace IRI from a term, so that
    /// `as:content` and `https://www.w3.org/ns/activitystreams#content`
    /// both read as `content`.
    pub fn normalize<'k>(&self, term: &'k str) -> &'k str {
        self.prefixes
            .iter()
            .find_map(|prefix| term.strip_prefix(prefix.as_str()))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(term)
    }

    /// Candidate type names declared by a map's `type` key, in declaration
    /// order, with bound prefixes stripped.
    pub fn type_candidates(&self, map: &Map<String, Value>) -> Vec<String> {
        let names: Vec<&str> = match map.get(TYPE_KEY) {
            Some(Value::String(name)) => vec![name.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        names
            .into_iter()
            .map(|name| self.normalize(name).to_string())
            .collect()
    }
}

fn trim_namespace(iri: &str) -> &str {
    iri.trim_end_matches(['#', '/'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AS: &str = "https://www.w3.org/ns/activitystreams";

    fn registry() -> TypeRegistry {
        let mut builder = TypeRegistry::builder();
        builder.namespace(AS);
        builder.freeze()
    }

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_full_namespace_iri_is_stripped() {
        let registry = registry();
        let ctx = DecodeContext::new(&registry);
        assert_eq!(ctx.normalize("https://www.w3.org/ns/activitystreams#content"), "content");
        assert_eq!(ctx.normalize("content"), "content");
        assert_eq!(ctx.normalize("as:content"), "as:content");
    }

    #[test]
    fn test_prefix_bound_in_context_is_stripped() {
        let registry = registry();
        let root = DecodeContext::new(&registry);
        let ctx = root.enter(&map(json!({
            "@context": [AS, {"as": "https://www.w3.org/ns/activitystreams#", "ex": "https://example.com/ns#"}]
        })));

        assert_eq!(ctx.normalize("as:content"), "content");
        assert_eq!(ctx.normalize("ex:content"), "ex:content");
        assert_eq!(ctx.normalize("as:"), "as:");
        // the parent context is untouched
        assert_eq!(root.normalize("as:content"), "as:content");
    }

    #[test]
    fn test_expanded_term_definition() {
        let registry = registry();
        let ctx = DecodeContext::new(&registry).enter(&map(json!({
            "@context": {"streams": {"@id": AS}}
        })));
        assert_eq!(ctx.normalize("streams:Note"), "Note");
    }

    #[test]
    fn test_type_candidates_keep_declaration_order() {
        let registry = registry();
        let ctx = DecodeContext::new(&registry).enter(&map(json!({"@context": {"as": AS}})));

        let candidates = ctx.type_candidates(&map(json!({"type": ["as:Mention", 5, "Link"]})));
        assert_eq!(candidates, ["Mention", "Link"]);

        assert_eq!(ctx.type_candidates(&map(json!({"type": "Note"}))), ["Note"]);
        assert!(ctx.type_candidates(&map(json!({"name": "x"}))).is_empty());
    }
}
