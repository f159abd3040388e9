//! Primary/replica routing adapter
//!
//! Owns a write-capable primary and a read-only replica behind one
//! [`Backend`] handle. Reads go to the replica until something writes;
//! the first write pins subsequent reads to the primary so they observe
//! the write, until [`reset_binding`](RoutingAdapter::reset_binding) is
//! called at the end of the unit of work.

use crate::backend::operation::{OperationKind, Query, Record};
use crate::backend::source::BackendSource;
use crate::backend::traits::{Backend, BackendFactory};
use crate::error::{BackendError, RouterError};
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Backend kind tag for [`RoutingAdapter`]
pub const ROUTING_KIND: &str = "routing";

// ============================================================================
// Options
// ============================================================================

/// Construction options for a routing adapter.
///
/// Both halves are required; each is either a live backend or a
/// configuration object resolved through the factory at construction time.
#[derive(Debug, Default)]
pub struct RoutingOptions {
    pub primary: Option<BackendSource>,
    pub replica: Option<BackendSource>,
}

impl RoutingOptions {
    pub fn new(primary: impl Into<BackendSource>, replica: impl Into<BackendSource>) -> Self {
        Self {
            primary: Some(primary.into()),
            replica: Some(replica.into()),
        }
    }
}

// ============================================================================
// Routing Adapter
// ============================================================================

/// A primary/replica router with write-triggered binding.
///
/// The binding state is a single atomic flag: when set, reads are served
/// by the primary; when clear, by the replica. Both backends are fixed for
/// the adapter's lifetime, so the current reader is always one of the two.
///
/// One logical unit of work at a time per instance is the usage contract.
/// The flag itself flips atomically, but nothing serializes a write racing
/// a concurrent read on the same instance; give each request/session its
/// own adapter or serialize access externally.
pub struct RoutingAdapter {
    name: String,
    primary: Arc<dyn Backend>,
    replica: Arc<dyn Backend>,
    bound_to_primary: AtomicBool,
}

impl RoutingAdapter {
    /// Create a routing adapter.
    ///
    /// Fails with [`RouterError::Configuration`] if either half is missing
    /// or its configuration cannot be resolved. There is no partial
    /// adapter: construction either yields a working router or nothing.
    pub fn new(
        name: impl Into<String>,
        options: RoutingOptions,
        factory: &dyn BackendFactory,
    ) -> Result<Self, RouterError> {
        let name = name.into();

        let primary = options
            .primary
            .ok_or_else(|| RouterError::configuration("routing adapter requires a primary backend"))?
            .resolve(&name, factory)?;

        let replica = options
            .replica
            .ok_or_else(|| RouterError::configuration("routing adapter requires a replica backend"))?
            .resolve(&name, factory)?;

        Ok(Self {
            name,
            primary,
            replica,
            bound_to_primary: AtomicBool::new(false),
        })
    }

    /// The write-capable primary backend.
    ///
    /// Direct access does not change binding state.
    pub fn primary(&self) -> &Arc<dyn Backend> {
        &self.primary
    }

    /// The read-only replica backend.
    pub fn replica(&self) -> &Arc<dyn Backend> {
        &self.replica
    }

    /// Whether reads are currently pinned to the primary.
    pub fn is_bound_to_primary(&self) -> bool {
        self.bound_to_primary.load(Ordering::SeqCst)
    }

    /// Pin reads to the primary until the binding is reset.
    pub fn bind_to_primary(&self) -> &Self {
        self.bind();
        self
    }

    /// Run a unit of work with reads pinned to the primary.
    ///
    /// Records the binding state on entry and restores exactly that state
    /// on every exit path, including an error return or an unwinding
    /// panic. An adapter that was already bound stays bound afterwards;
    /// nested scopes therefore compose.
    pub async fn bind_to_primary_scoped<F, Fut, T>(&self, work: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let prior = self.bound_to_primary.swap(true, Ordering::SeqCst);
        let _restore = BindRestore {
            flag: &self.bound_to_primary,
            prior,
        };
        work().await
    }

    /// Unpin reads from the primary.
    ///
    /// Idempotent; the request-boundary hook calls this after every unit
    /// of work, success or failure, so write-triggered binding never leaks
    /// into the next one.
    pub fn reset_binding(&self) -> &Self {
        self.bound_to_primary.store(false, Ordering::SeqCst);
        self
    }

    fn bind(&self) {
        let was_bound = self.bound_to_primary.swap(true, Ordering::SeqCst);
        if !was_bound {
            tracing::debug!(
                adapter = %self.name,
                primary = %self.primary.name(),
                "Reads bound to primary"
            );
        }
    }

    fn reader(&self) -> &Arc<dyn Backend> {
        if self.is_bound_to_primary() {
            &self.primary
        } else {
            &self.replica
        }
    }

    /// Binding happens before the forward, so a failed write still leaves
    /// the adapter bound; the caller may retry its read path safely.
    fn writer(&self) -> &Arc<dyn Backend> {
        self.bind();
        &self.primary
    }
}

/// Restores the recorded binding state when a scope exits.
struct BindRestore<'a> {
    flag: &'a AtomicBool,
    prior: bool,
}

impl Drop for BindRestore<'_> {
    fn drop(&mut self) {
        self.flag.store(self.prior, Ordering::SeqCst);
    }
}

#[async_trait]
impl Backend for RoutingAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        ROUTING_KIND
    }

    /// Matches its own kind, otherwise whatever the primary matches: once
    /// bound for write, the adapter stands in for the primary in
    /// kind-dependent dispatch.
    fn supports(&self, kind: &str) -> bool {
        kind == ROUTING_KIND || self.primary.supports(kind)
    }

    async fn create(&self, record: &Record) -> Result<u64, BackendError> {
        self.writer().create(record).await
    }

    async fn read(&self, query: &Query) -> Result<Vec<Record>, BackendError> {
        self.reader().read(query).await
    }

    async fn update(&self, record: &Record) -> Result<u64, BackendError> {
        self.writer().update(record).await
    }

    async fn delete(&self, record: &Record) -> Result<u64, BackendError> {
        self.writer().delete(record).await
    }

    async fn aggregate(&self, query: &Query) -> Result<Value, BackendError> {
        self.reader().aggregate(query).await
    }

    /// Catch-all dispatch: read-class names go to the current reader with
    /// no state change; every other name is treated as a write and binds.
    async fn execute(&self, operation: &str, args: Value) -> Result<Value, BackendError> {
        if OperationKind::classify(operation).is_read() {
            self.reader().execute(operation, args).await
        } else {
            self.writer().execute(operation, args).await
        }
    }
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("name", &self.name)
            .field("primary", &self.primary.name())
            .field("replica", &self.replica.name())
            .field("bound_to_primary", &self.is_bound_to_primary())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
