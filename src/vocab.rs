//! ActivityStreams 2.0 core and extended types, as engine schemas.
//!
//! See <https://www.w3.org/TR/activitystreams-vocabulary/>. Only a working
//! subset of the vocabulary is declared; anything else a peer sends is kept
//! as unknown data by the engine.
use std::sync::Arc;

use once_cell::sync::Lazy;
use vocab_engine::{
    Capability, Kind, PropertySpec, RegistryError, Schema, TypeRegistry, TypeRegistryBuilder,
};

pub const AS_NAMESPACE: &str = "https://www.w3.org/ns/activitystreams";

/// Addressing IRI for the public collection.
pub const PUBLIC: &str = "https://www.w3.org/ns/activitystreams#Public";

// A reference to another node: inline object or link, or just its IRI.
fn reference(name: &str) -> PropertySpec {
    PropertySpec::list(name).accepts([Kind::Iri, Kind::Object, Kind::Link])
}

// Human-readable text with a `<name>Map` companion.
fn text(name: &str) -> PropertySpec {
    PropertySpec::list(name)
        .accepts([Kind::STRING, Kind::LANG_STRING])
        .with_language_map()
}

fn timestamp(name: &str) -> PropertySpec {
    PropertySpec::functional(name).accepts([Kind::DATE_TIME])
}

fn dimension(name: &str) -> PropertySpec {
    PropertySpec::functional(name).accepts([Kind::NON_NEGATIVE_INTEGER])
}

fn coordinate(name: &str) -> PropertySpec {
    PropertySpec::functional(name).accepts([Kind::FLOAT])
}

pub static OBJECT: Lazy<Arc<Schema>> = Lazy::new(|| {
    Schema::builder("Object", Capability::Object)
        .property(PropertySpec::functional("id").accepts([Kind::Iri]))
        .property(reference("attachment"))
        .property(reference("attributedTo"))
        .property(reference("to"))
        .property(reference("cc"))
        .property(text("content"))
        .property(text("name"))
        .property(text("summary"))
        .property(timestamp("published"))
        .property(timestamp("updated"))
        .property(timestamp("startTime"))
        .property(PropertySpec::functional("duration").accepts([Kind::DURATION]))
        .property(PropertySpec::functional("mediaType").accepts([Kind::MEDIA_TYPE]))
        .property(PropertySpec::list("url").accepts([Kind::Iri, Kind::Link]))
        .property(reference("tag"))
        .property(reference("inReplyTo"))
        .property(reference("icon"))
        .property(PropertySpec::list("preview").accepts([Kind::Iri, Kind::Link, Kind::Object]))
        .build()
});

pub static NOTE: Lazy<Arc<Schema>> =
    Lazy::new(|| Schema::builder("Note", Capability::Object).extends(&OBJECT).build());

pub static ARTICLE: Lazy<Arc<Schema>> =
    Lazy::new(|| Schema::builder("Article", Capability::Object).extends(&OBJECT).build());

pub static IMAGE: Lazy<Arc<Schema>> =
    Lazy::new(|| Schema::builder("Image", Capability::Object).extends(&OBJECT).build());

pub static PERSON: Lazy<Arc<Schema>> =
    Lazy::new(|| Schema::builder("Person", Capability::Object).extends(&OBJECT).build());

pub static PLACE: Lazy<Arc<Schema>> = Lazy::new(|| {
    Schema::builder("Place", Capability::Object)
        .extends(&OBJECT)
        .property(coordinate("latitude"))
        .property(coordinate("longitude"))
        // percentage, 0 to 100
        .property(coordinate("accuracy"))
        .build()
});

pub static ACTIVITY: Lazy<Arc<Schema>> = Lazy::new(|| {
    Schema::builder("Activity", Capability::Object)
        .extends(&OBJECT)
        .property(reference("actor"))
        .property(reference("object"))
        .build()
});

pub static CREATE: Lazy<Arc<Schema>> =
    Lazy::new(|| Schema::builder("Create", Capability::Object).extends(&ACTIVITY).build());

pub static COLLECTION: Lazy<Arc<Schema>> = Lazy::new(|| {
    Schema::builder("Collection", Capability::Object)
        .extends(&OBJECT)
        .property(dimension("totalItems"))
        .property(reference("items"))
        .build()
});

pub static LINK: Lazy<Arc<Schema>> = Lazy::new(|| {
    Schema::builder("Link", Capability::Link)
        .property(PropertySpec::functional("href").accepts([Kind::ANY_URI]))
        .property(PropertySpec::functional("hreflang").accepts([Kind::BCP47]))
        .property(PropertySpec::functional("mediaType").accepts([Kind::MEDIA_TYPE]))
        .property(text("name"))
        .property(PropertySpec::list("rel").accepts([Kind::STRING]))
        .property(dimension("height"))
        .property(dimension("width"))
        .property(PropertySpec::list("preview").accepts([Kind::Iri, Kind::Link, Kind::Object]))
        .build()
});

pub static MENTION: Lazy<Arc<Schema>> =
    Lazy::new(|| Schema::builder("Mention", Capability::Link).extends(&LINK).build());

/// Every schema declared here, parents before children.
pub fn schemas() -> [&'static Arc<Schema>; 11] {
    [
        &OBJECT,
        &NOTE,
        &ARTICLE,
        &IMAGE,
        &PERSON,
        &PLACE,
        &ACTIVITY,
        &CREATE,
        &COLLECTION,
        &LINK,
        &MENTION,
    ]
}

/// Adds the ActivityStreams namespace and types to `builder`.
pub fn register(builder: &mut TypeRegistryBuilder) -> Result<(), RegistryError> {
    builder.namespace(AS_NAMESPACE);
    for schema in schemas() {
        builder.register_schema(schema)?;
    }
    Ok(())
}

/// A builder preloaded with the ActivityStreams types, ready for
/// application-specific extensions.
pub fn builder() -> Result<TypeRegistryBuilder, RegistryError> {
    let mut builder = TypeRegistry::builder();
    register(&mut builder)?;
    Ok(builder)
}

pub fn default_registry() -> Result<TypeRegistry, RegistryError> {
    builder().map(TypeRegistryBuilder::freeze)
}
