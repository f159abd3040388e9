//! Error types for the routing layer

pub mod types;

pub use types::{BackendError, RouterError};
