/*! # activity-vocab

ActivityStreams 2.0 vocabulary types on top of the `vocab-engine` property
codec.

## Features

- **Vocabulary**: schemas for the core ActivityStreams types in [`vocab`], registered
  in a process-wide [`registry::global`] registry.
- **Documents**: [`ldmodel::Document`] wraps a decoded object together with its JSON-LD `@context`.
- **Configuration**: [`config::CodecConfig`] is read from the environment and `.env` files.

```rust
use activity_vocab::{ldmodel::Document, serde_json::json};

let document = Document::from_value(&json!({
    "@context": "https://www.w3.org/ns/activitystreams",
    "type": "Note",
    "content": "hi",
    "contentMap": {"en": "hi"}
}))
.unwrap();

assert_eq!(document.object.text("content", Some("en")), Some("hi"));
```
*/
pub mod config;
pub mod ldmodel;
pub mod logging;
pub mod registry;
pub mod vocab;

pub use serde_json;
pub use vocab_engine as engine;
pub use vocab_scalars as scalars;
