//! Handler registry.
//!
//! Maps file extensions to handler factories. A process-wide registry is
//! seeded with the built-in handlers and extended at runtime through
//! [`register_handler`] and [`register_factory`]; a standalone
//! [`HandlerRegistry`] can be built for callers that want their own.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::config::handler::{ConfigHandler, HandlerType};
use crate::config::json::JsonConfigHandler;
use crate::error::RegistryError;

type HandlerFactory = Arc<dyn Fn() -> Box<dyn ConfigHandler> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    origin: String,
    factory: HandlerFactory,
}

/// Registry of config handlers keyed by extension (e.g. `.json`).
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Registration>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in handlers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(
            JsonConfigHandler::EXTENSION,
            std::any::type_name::<JsonConfigHandler>().to_string(),
            Arc::new(|| Box::new(JsonConfigHandler::default()) as Box<dyn ConfigHandler>),
        );
        registry
    }

    /// Register a handler type under its declared extension.
    pub fn register<H: HandlerType>(&mut self) -> Result<(), RegistryError> {
        let origin = std::any::type_name::<H>();
        self.try_insert(
            H::EXTENSION,
            origin.to_string(),
            Arc::new(|| Box::new(H::default()) as Box<dyn ConfigHandler>),
        )
    }

    /// Register a factory closure for `extension`.
    pub fn register_factory<F>(&mut self, extension: &str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn ConfigHandler> + Send + Sync + 'static,
    {
        self.try_insert(
            extension,
            format!("factory for {}", extension),
            Arc::new(factory),
        )
    }

    /// Build one fresh handler, with no path set, per registered extension.
    pub fn allowed_types(&self) -> HashMap<String, Box<dyn ConfigHandler>> {
        self.handlers
            .iter()
            .map(|(ext, registration)| (ext.clone(), (registration.factory)()))
            .collect()
    }

    /// Build a fresh handler for `extension`.
    pub fn create(&self, extension: &str) -> Option<Box<dyn ConfigHandler>> {
        self.handlers
            .get(extension)
            .map(|registration| (registration.factory)())
    }

    pub fn supports(&self, extension: &str) -> bool {
        self.handlers.contains_key(extension)
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<_> = self.handlers.keys().cloned().collect();
        extensions.sort();
        extensions
    }

    fn try_insert(
        &mut self,
        extension: &str,
        origin: String,
        factory: HandlerFactory,
    ) -> Result<(), RegistryError> {
        if extension.is_empty() {
            return Err(RegistryError::MissingContract { type_name: origin });
        }
        if let Some(existing) = self.handlers.get(extension) {
            return Err(RegistryError::DuplicateExtension {
                extension: extension.to_string(),
                existing: existing.origin.clone(),
            });
        }

        tracing::debug!(extension, origin = %origin, "Config handler registered");
        self.insert(extension, origin, factory);
        Ok(())
    }

    fn insert(&mut self, extension: &str, origin: String, factory: HandlerFactory) {
        self.handlers
            .insert(extension.to_string(), Registration { origin, factory });
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

static GLOBAL_REGISTRY: LazyLock<RwLock<HandlerRegistry>> =
    LazyLock::new(|| RwLock::new(HandlerRegistry::with_defaults()));

/// Register a handler type with the process-wide registry.
pub fn register_handler<H: HandlerType>() -> Result<(), RegistryError> {
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register::<H>()
}

/// Register a factory closure with the process-wide registry.
pub fn register_factory<F>(extension: &str, factory: F) -> Result<(), RegistryError>
where
    F: Fn() -> Box<dyn ConfigHandler> + Send + Sync + 'static,
{
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register_factory(extension, factory)
}

/// Fresh handler instances for every extension known to the process-wide
/// registry, including ones registered after startup.
pub fn get_allowed_types() -> HashMap<String, Box<dyn ConfigHandler>> {
    global_registry().allowed_types()
}

/// Snapshot of the process-wide registry.
pub fn global_registry() -> HandlerRegistry {
    GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
