use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use vocab_engine::{context::CONTEXT_KEY, CodecError, TypeRegistry, VocabularyObject};

use crate::{config::CodecConfig, registry, vocab::AS_NAMESPACE};

// The @context property defines the vocabulary used in the JSON-LD document.
// It maps the keys in the JSON structure to terms of external vocabularies.
// Read and written through `From<&Value>` and `to_value`.
#[derive(Debug, Clone, PartialEq)]
pub enum Context {
    SingleString(String),
    SetOfString(Vec<String>),
    JsonObject(Value),
}

impl From<&Value> for Context {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(iri) => Context::SingleString(iri.clone()),
            Value::Array(items) if items.iter().all(Value::is_string) => Context::SetOfString(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            other => Context::JsonObject(other.clone()),
        }
    }
}

impl Context {
    pub fn to_value(&self) -> Value {
        match self {
            Context::SingleString(iri) => Value::String(iri.clone()),
            Context::SetOfString(iris) => iris.iter().cloned().map(Value::String).collect(),
            Context::JsonObject(value) => value.clone(),
        }
    }
}

/// A top-level JSON-LD document: one vocabulary object plus the `@context`
/// it was framed with.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub context: Option<Context>,
    pub object: VocabularyObject,
}

impl Document {
    pub fn new(object: VocabularyObject) -> Self {
        Self {
            context: None,
            object,
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Decodes with the global registry and the default configuration.
    pub fn from_value(value: &Value) -> Result<Self, CodecError> {
        Self::from_value_with(value, registry::global()?, &CodecConfig::default())
    }

    pub fn from_value_with(
        value: &Value,
        registry: &TypeRegistry,
        config: &CodecConfig,
    ) -> Result<Self, CodecError> {
        let object = registry.to_object(value)?;
        let context = match value {
            Value::Object(map) if config.preserve_context => map.get(CONTEXT_KEY).map(Context::from),
            _ => None,
        };
        Ok(Self { context, object })
    }

    pub fn to_value(&self) -> Value {
        self.to_value_with(&CodecConfig::default())
    }

    /// Encodes the object with `@context` as its first key.
    pub fn to_value_with(&self, config: &CodecConfig) -> Value {
        let mut map = Map::new();
        match &self.context {
            Some(context) => {
                map.insert(CONTEXT_KEY.to_string(), context.to_value());
            }
            None if config.emit_default_context => {
                map.insert(CONTEXT_KEY.to_string(), Value::String(AS_NAMESPACE.to_string()));
            }
            None => {}
        }
        map.extend(self.object.to_map());
        Value::Object(map)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_shapes() {
        assert_eq!(
            Context::from(&json!(AS_NAMESPACE)),
            Context::SingleString(AS_NAMESPACE.to_string())
        );
        assert_eq!(
            Context::from(&json!([AS_NAMESPACE, "https://w3id.org/security/v1"])),
            Context::SetOfString(vec![
                AS_NAMESPACE.to_string(),
                "https://w3id.org/security/v1".to_string()
            ])
        );

        let mixed = json!([AS_NAMESPACE, {"toot": "http://joinmastodon.org/ns#"}]);
        assert_eq!(Context::from(&mixed), Context::JsonObject(mixed.clone()));
        assert_eq!(Context::from(&mixed).to_value(), mixed);

        for raw in [json!(AS_NAMESPACE), json!([AS_NAMESPACE, "https://w3id.org/security/v1"])] {
            assert_eq!(Context::from(&raw).to_value(), raw);
        }
    }

    #[test]
    fn test_context_is_kept_and_emitted_first() {
        let raw = json!({
            "@context": [AS_NAMESPACE, {"as": "https://www.w3.org/ns/activitystreams#"}],
            "type": "Note",
            "as:content": "hi"
        });
        let document = Document::from_value(&raw).unwrap();
        let encoded = document.to_value();

        let keys: Vec<&String> = encoded.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["@context", "type", "content"]);
        assert_eq!(encoded["@context"], raw["@context"]);
        assert_eq!(encoded["content"], json!("hi"));
    }

    #[test]
    fn test_context_handling_follows_config() {
        let registry = crate::vocab::default_registry().unwrap();
        let raw = json!({"@context": "https://example.com/ctx", "type": "Note"});

        let keep_nothing = CodecConfig {
            emit_default_context: false,
            preserve_context: false,
        };
        let document = Document::from_value_with(&raw, &registry, &keep_nothing).unwrap();
        assert_eq!(document.context, None);
        assert_eq!(document.to_value_with(&keep_nothing), json!({"type": "Note"}));
        assert_eq!(
            document.to_value_with(&CodecConfig::default()),
            json!({"@context": AS_NAMESPACE, "type": "Note"})
        );
    }

    #[test]
    fn test_serde() {
        let document: Document =
            serde_json::from_str(r#"{"type": "Note", "content": "hi"}"#).unwrap();
        assert_eq!(document.object.type_name(), "Note");
        assert_eq!(
            serde_json::to_string(&document).unwrap(),
            r#"{"@context":"https://www.w3.org/ns/activitystreams","type":"Note","content":"hi"}"#
        );

        let err = serde_json::from_str::<Document>(r#"{"content": "hi"}"#).unwrap_err();
        assert!(err.to_string().contains("type"));
    }
}
