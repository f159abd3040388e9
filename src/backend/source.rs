//! Backend-or-config constructor arguments

use crate::backend::traits::{Backend, BackendFactory};
use crate::config::BackendConfig;
use crate::error::RouterError;
use std::sync::Arc;

/// A constructor argument that is either a live backend or the
/// configuration to build one.
///
/// Resolution happens exactly once, at adapter construction time; the
/// resolved backend is then fixed for the adapter's lifetime.
#[derive(Clone)]
pub enum BackendSource {
    /// An already-constructed backend, used as-is
    Built(Arc<dyn Backend>),
    /// A configuration object, resolved through the supplied factory
    Config(BackendConfig),
}

impl BackendSource {
    /// Resolve into a live backend.
    ///
    /// `name` is the owning adapter's name and is handed to the factory
    /// unchanged, so all backends under one repository share it.
    pub fn resolve(
        self,
        name: &str,
        factory: &dyn BackendFactory,
    ) -> Result<Arc<dyn Backend>, RouterError> {
        match self {
            Self::Built(backend) => Ok(backend),
            Self::Config(config) => factory.construct(name, &config),
        }
    }
}

impl std::fmt::Debug for BackendSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Built(backend) => f
                .debug_struct("Built")
                .field("name", &backend.name())
                .field("kind", &backend.kind())
                .finish(),
            Self::Config(config) => f.debug_tuple("Config").field(config).finish(),
        }
    }
}

impl From<Arc<dyn Backend>> for BackendSource {
    fn from(backend: Arc<dyn Backend>) -> Self {
        Self::Built(backend)
    }
}

impl From<BackendConfig> for BackendSource {
    fn from(config: BackendConfig) -> Self {
        Self::Config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use crate::backend::registry::BackendRegistry;

    #[test]
    fn test_built_source_resolves_to_same_backend() {
        let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new("test"));
        let source = BackendSource::from(backend.clone());

        let resolved = source.resolve("test", &BackendRegistry::new()).unwrap();
        assert!(Arc::ptr_eq(&backend, &resolved));
    }

    #[test]
    fn test_config_source_resolves_through_factory() {
        let source = BackendSource::from(BackendConfig::new("memory"));

        let resolved = source
            .resolve("reporting", &BackendRegistry::with_defaults())
            .unwrap();
        assert_eq!(resolved.name(), "reporting");
        assert_eq!(resolved.kind(), "memory");
    }

    #[test]
    fn test_unknown_driver_fails_configuration() {
        let source = BackendSource::from(BackendConfig::new("postgres"));

        let err = source
            .resolve("test", &BackendRegistry::new())
            .unwrap_err();
        assert!(matches!(err, RouterError::Configuration(_)));
    }
}
