//! Middleware module
//!
//! Request-lifecycle integration for the routing adapters.

pub mod unbinding;

pub use unbinding::{reset_after_request, BindingReset, UnbindState};
