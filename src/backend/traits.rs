//! Backend capability and factory contracts
//!
//! `Backend` is the single contract both routing adapters implement and
//! consume, so adapters nest: a pool can serve as the replica of a routing
//! adapter, and a routing adapter can be a pool member.

use crate::backend::operation::{Query, Record};
use crate::config::BackendConfig;
use crate::error::{BackendError, RouterError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A polymorphic data backend.
///
/// Write operations return the number of affected records; `read` returns
/// matching records; `aggregate` and `execute` return backend-defined
/// values. Failures surface as [`BackendError`] and are passed through the
/// routing layer verbatim.
#[async_trait]
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Repository-level name this backend was constructed under
    fn name(&self) -> &str;

    /// Declared kind tag, e.g. `"memory"`, `"routing"`, `"pool"`
    fn kind(&self) -> &str;

    /// Whether this backend matches a kind tag.
    ///
    /// The default answer is identity on [`kind`](Backend::kind). Wrapping
    /// adapters widen this to the backends they stand in for.
    fn supports(&self, kind: &str) -> bool {
        self.kind() == kind
    }

    async fn create(&self, record: &Record) -> Result<u64, BackendError>;

    async fn read(&self, query: &Query) -> Result<Vec<Record>, BackendError>;

    async fn update(&self, record: &Record) -> Result<u64, BackendError>;

    async fn delete(&self, record: &Record) -> Result<u64, BackendError>;

    async fn aggregate(&self, query: &Query) -> Result<Value, BackendError>;

    /// Forward an arbitrary named operation with opaque arguments.
    ///
    /// This is the open-extensibility path: the routing layer does not
    /// enumerate every operation a backend understands. Backends that do
    /// not recognize `operation` should fail with
    /// [`BackendError::UnsupportedOperation`].
    async fn execute(&self, operation: &str, args: Value) -> Result<Value, BackendError>;
}

/// Constructs backends from configuration objects.
///
/// Consumed by adapter construction whenever a [`BackendConfig`] is supplied
/// in place of an already-built backend. The adapter passes its own name
/// through, so a routing adapter named `default` resolves its halves as
/// `default` too.
pub trait BackendFactory: Send + Sync {
    fn construct(
        &self,
        name: &str,
        config: &BackendConfig,
    ) -> Result<Arc<dyn Backend>, RouterError>;
}
