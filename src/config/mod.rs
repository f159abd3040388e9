//! Configuration management module
//!
//! Backend configuration objects, declarative adapter topology, and
//! environment-driven application settings.

pub mod settings;

pub use settings::{AdapterConfig, BackendConfig, Settings};
