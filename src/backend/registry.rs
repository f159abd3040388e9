//! Backend constructor registry
//!
//! Maps driver names to constructor functions. This is the default
//! [`BackendFactory`] used when adapters are handed configuration objects
//! instead of live backends.

use crate::backend::memory::MemoryBackend;
use crate::backend::traits::{Backend, BackendFactory};
use crate::config::BackendConfig;
use crate::error::RouterError;
use std::collections::HashMap;
use std::sync::Arc;

/// Constructor function for one driver name
pub type Constructor =
    Box<dyn Fn(&str, &BackendConfig) -> Result<Arc<dyn Backend>, RouterError> + Send + Sync>;

/// A registry of backend constructors keyed by driver name.
pub struct BackendRegistry {
    constructors: HashMap<String, Constructor>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry with the built-in `memory` driver registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("memory", |name, _config| {
            Ok(Arc::new(MemoryBackend::new(name)) as Arc<dyn Backend>)
        });
        registry
    }

    /// Register a constructor for a driver name.
    ///
    /// Re-registering a name replaces the previous constructor.
    pub fn register<F>(&mut self, driver: impl Into<String>, constructor: F)
    where
        F: Fn(&str, &BackendConfig) -> Result<Arc<dyn Backend>, RouterError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors
            .insert(driver.into(), Box::new(constructor));
    }

    /// Names of all registered drivers, sorted
    pub fn drivers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BackendFactory for BackendRegistry {
    fn construct(
        &self,
        name: &str,
        config: &BackendConfig,
    ) -> Result<Arc<dyn Backend>, RouterError> {
        let constructor = self.constructors.get(&config.driver).ok_or_else(|| {
            RouterError::configuration(format!("unknown backend driver: {}", config.driver))
        })?;

        tracing::debug!(
            name = %name,
            driver = %config.driver,
            "Constructing backend from configuration"
        );

        constructor(name, config)
    }
}
