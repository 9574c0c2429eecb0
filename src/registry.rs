//! The process-wide type registry.
//!
//! Applications may [`install`] their own registry once at start-up,
//! typically built from [`crate::vocab::builder`] plus their extension
//! types. The first call to [`global`] freezes the choice: without a prior
//! install it falls back to the ActivityStreams defaults.
use once_cell::sync::OnceCell;
use vocab_engine::{RegistryError, TypeRegistry};

use crate::vocab;

static GLOBAL: OnceCell<TypeRegistry> = OnceCell::new();

pub fn install(registry: TypeRegistry) -> Result<(), RegistryError> {
    GLOBAL.set(registry).map_err(|_| {
        tracing::error!("global type registry is already in use");
        RegistryError::AlreadyFrozen
    })?;
    tracing::info!("installed global type registry");
    Ok(())
}

pub fn global() -> Result<&'static TypeRegistry, RegistryError> {
    GLOBAL.get_or_try_init(|| {
        tracing::debug!("initializing global type registry with ActivityStreams defaults");
        vocab::default_registry()
    })
}
