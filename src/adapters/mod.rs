//! Routing adapters
//!
//! Two independent dispatchers behind the shared [`Backend`] contract:
//!
//! - [`RoutingAdapter`] splits traffic between a write-capable primary and
//!   a read-only replica, pinning reads to the primary once anything
//!   writes.
//! - [`PoolAdapter`] distributes every operation uniformly at random
//!   across a fixed set of equivalent backends.
//!
//! Both construct from live backends or configuration objects, and both
//! implement [`Backend`], so they nest: a pool can serve as the replica of
//! a routing adapter.
//!
//! # Example
//! ```ignore
//! use backend_router::adapters::{RoutingAdapter, RoutingOptions};
//! use backend_router::backend::BackendRegistry;
//! use backend_router::config::BackendConfig;
//!
//! let registry = BackendRegistry::with_defaults();
//! let adapter = RoutingAdapter::new(
//!     "default",
//!     RoutingOptions::new(BackendConfig::new("memory"), BackendConfig::new("memory")),
//!     &registry,
//! )?;
//!
//! // Reads hit the replica until the first write
//! let rows = adapter.read(&query).await?;
//! ```
//!
//! [`Backend`]: crate::backend::Backend

pub mod pool;
pub mod routing;

#[cfg(test)]
mod support;

pub use pool::{PoolAdapter, PoolOptions, RandomSelector, Selector, POOL_KIND};
pub use routing::{RoutingAdapter, RoutingOptions, ROUTING_KIND};
