//! Backend contract and construction
//!
//! Defines the polymorphic [`Backend`] capability consumed and implemented
//! by the routing adapters, the backend-or-config [`BackendSource`]
//! constructor argument, and the driver registry used to resolve
//! configuration objects into live backends.

pub mod memory;
pub mod operation;
pub mod registry;
pub mod source;
pub mod traits;

pub use memory::MemoryBackend;
pub use operation::{OperationKind, Query, Record, READ_OPERATIONS};
pub use registry::{BackendRegistry, Constructor};
pub use source::BackendSource;
pub use traits::{Backend, BackendFactory};
