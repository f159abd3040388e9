//! Primary/replica request routing for database access layers
//!
//! One [`Backend`] handle that decides, per operation, which underlying
//! backend serves it: a [`RoutingAdapter`] splitting reads from writes
//! across a primary and a replica, and a [`PoolAdapter`] spreading every
//! operation randomly across equivalent backends.

// Public modules
pub mod adapters;
pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;

// Re-export commonly used types
pub use adapters::{PoolAdapter, PoolOptions, RoutingAdapter, RoutingOptions};
pub use backend::{Backend, BackendFactory, BackendRegistry, BackendSource, Query, Record};
pub use config::{AdapterConfig, BackendConfig, Settings};
pub use error::{BackendError, RouterError};
