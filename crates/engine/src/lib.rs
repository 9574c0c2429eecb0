/*! # vocab-engine

The polymorphic property codec behind ActivityStreams style vocabularies.

A vocabulary type is described by a [`Schema`]: its name, the table it is
resolved through ([`Capability`]) and its properties. Each [`PropertySpec`]
declares the kinds a property accepts, whether it is functional, and whether
it carries a companion `<name>Map` natural-language map.

Decoding walks a JSON map key by key. Each occurrence becomes a
[`PropertyValue`]: a nested object or link resolved through the
[`TypeRegistry`], a bare IRI, a scalar, or, when nothing accepts it, the raw
JSON kept verbatim so it survives re-encoding.

```rust
use std::sync::Arc;
use serde_json::json;
use vocab_engine::{Capability, Kind, PropertySpec, Schema, TypeRegistry};

let note = Schema::builder("Note", Capability::Object)
    .property(PropertySpec::list("content").accepts([Kind::STRING]).with_language_map())
    .build();

let mut builder = TypeRegistry::builder();
builder.register_schema(&note).unwrap();
let registry = builder.freeze();

let value = json!({"type": "Note", "content": "hi", "contentMap": {"en": "hi"}});
let object = registry.to_object(&value).unwrap();
assert_eq!(object.text("content", Some("en")), Some("hi"));
assert_eq!(object.to_value(), value);
```
*/
pub mod context;
pub mod error;
pub mod functional;
pub mod kind;
pub mod langmap;
pub mod list;
pub mod object;
pub mod registry;
pub mod schema;
pub mod value;

pub use context::DecodeContext;
pub use error::{CodecError, RegistryError};
pub use functional::FunctionalSlot;
pub use kind::Kind;
pub use langmap::NaturalLanguageMap;
pub use list::PropertyList;
pub use object::{PropertySlot, VocabularyObject};
pub use registry::{Capability, TypeConstructor, TypeRegistry, TypeRegistryBuilder};
pub use schema::{Cardinality, PropertySpec, Schema, SchemaBuilder, UnknownPolicy};
pub use value::PropertyValue;

pub use vocab_scalars as scalars;
