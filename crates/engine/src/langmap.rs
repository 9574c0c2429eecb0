use std::collections::BTreeMap;

use serde_json::{Map, Value};
use vocab_scalars::{describe, FormatError, ScalarKind};

/// Per-language variants of a text property, carried under the sibling
/// `<property>Map` wire key.
///
/// Independent of the plain values of the same property: both can be set
/// at once and neither is derived from the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaturalLanguageMap {
    entries: BTreeMap<String, String>,
}

impl NaturalLanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language tags present, sorted.
    pub fn languages(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// The text for `language`, empty when the language is absent.
    pub fn get(&self, language: &str) -> &str {
        self.entries.get(language).map_or("", String::as_str)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.entries.contains_key(language)
    }

    pub fn set(&mut self, language: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(language.into(), value.into());
    }

    pub fn remove(&mut self, language: &str) -> Option<String> {
        self.entries.remove(language)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<Map<_, _>>(),
        )
    }

    pub fn from_value(raw: &Value) -> Result<Self, FormatError> {
        let Value::Object(map) = raw else {
            return Err(FormatError::new(
                ScalarKind::LangString,
                format!("expected a language map object, found {}", describe(raw)),
            ));
        };

        let mut entries = BTreeMap::new();
        for (language, value) in map {
            let Value::String(text) = value else {
                return Err(FormatError::new(
                    ScalarKind::LangString,
                    format!("value for {language:?} is a {}", describe(value)),
                ));
            };
            entries.insert(language.clone(), text.clone());
        }
        Ok(Self { entries })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NaturalLanguageMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
