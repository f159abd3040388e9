//! Topology configuration and application settings
//!
//! Configuration objects accepted wherever a live backend is not supplied,
//! a serde-tagged topology description that can resolve a whole adapter
//! tree, and environment-driven application settings.

use crate::adapters::{PoolAdapter, PoolOptions, RoutingAdapter, RoutingOptions};
use crate::backend::{Backend, BackendFactory, BackendSource};
use crate::error::RouterError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::sync::Arc;

/// Configuration object for one backend.
///
/// `driver` selects a registered constructor; `options` is an opaque body
/// handed to that constructor (connection strings, credentials, whatever
/// the driver understands).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Registered driver name, e.g. `"memory"`
    pub driver: String,
    /// Driver-interpreted options body
    #[serde(default)]
    pub options: Value,
}

impl BackendConfig {
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            options: Value::Null,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }
}

/// Declarative adapter topology.
///
/// Nests arbitrarily: a pool can appear as the replica of a routing
/// adapter, a routing adapter can be a pool member. `build` resolves the
/// whole tree through one factory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdapterConfig {
    /// A single concrete backend
    Single {
        #[serde(flatten)]
        backend: BackendConfig,
    },
    /// Primary/replica routing adapter
    Routing {
        primary: Box<AdapterConfig>,
        replica: Box<AdapterConfig>,
    },
    /// Random-dispatch pool adapter
    Pool { members: Vec<AdapterConfig> },
}

impl AdapterConfig {
    /// Resolve this topology into a live backend tree.
    pub fn build(
        &self,
        name: &str,
        factory: &dyn BackendFactory,
    ) -> Result<Arc<dyn Backend>, RouterError> {
        match self {
            Self::Single { backend } => factory.construct(name, backend),
            Self::Routing { primary, replica } => {
                let primary = primary.build(name, factory)?;
                let replica = replica.build(name, factory)?;
                let adapter =
                    RoutingAdapter::new(name, RoutingOptions::new(primary, replica), factory)?;
                Ok(Arc::new(adapter))
            }
            Self::Pool { members } => {
                let sources = members
                    .iter()
                    .map(|member| Ok(BackendSource::from(member.build(name, factory)?)))
                    .collect::<Result<Vec<_>, RouterError>>()?;
                let adapter = PoolAdapter::new(name, PoolOptions::new(sources), factory)?;
                Ok(Arc::new(adapter))
            }
        }
    }
}

/// Application settings loaded from the environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub log_level: String,
    /// Repository name adapters are constructed under when none is given
    pub default_repository: String,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignored in production typically)
        dotenvy::dotenv().ok();

        let settings = Self {
            app_name: env_or_default("APP_NAME", "backend-router"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: env_or_default("LOG_LEVEL", "info"),
            default_repository: env_or_default("DEFAULT_REPOSITORY", "default"),
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    fn validate(&self) -> Result<()> {
        if self.default_repository.is_empty() {
            anyhow::bail!("DEFAULT_REPOSITORY cannot be empty");
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "backend-router".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            default_repository: "default".to_string(),
        }
    }
}

/// Helper function to get environment variable with default
fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
