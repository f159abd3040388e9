//! Random-dispatch pool adapter
//!
//! Owns a fixed set of equivalent backends and forwards every operation,
//! read or write, to one member chosen uniformly at random per call. No
//! affinity, no rotation memory: two operations in the same unit of work
//! may land on different members.

use crate::backend::operation::{Query, Record};
use crate::backend::source::BackendSource;
use crate::backend::traits::{Backend, BackendFactory};
use crate::error::{BackendError, RouterError};
use async_trait::async_trait;
use rand::Rng;
use serde_json::Value;
use std::sync::Arc;

/// Backend kind tag for [`PoolAdapter`]
pub const POOL_KIND: &str = "pool";

// ============================================================================
// Member Selection
// ============================================================================

/// Picks a member index for one dispatch.
///
/// The seam exists so tests can force a selection; production pools use
/// [`RandomSelector`].
pub trait Selector: Send + Sync {
    /// Return an index in `0..len`. `len` is always at least 1.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random selection, independent per call.
#[derive(Debug, Default)]
pub struct RandomSelector;

impl Selector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

// ============================================================================
// Options
// ============================================================================

/// Construction options for a pool adapter.
#[derive(Debug, Default)]
pub struct PoolOptions {
    pub members: Option<Vec<BackendSource>>,
}

impl PoolOptions {
    pub fn new(members: Vec<BackendSource>) -> Self {
        Self {
            members: Some(members),
        }
    }
}

// ============================================================================
// Pool Adapter
// ============================================================================

/// A pool of interchangeable backends with per-call random dispatch.
pub struct PoolAdapter {
    name: String,
    members: Vec<Arc<dyn Backend>>,
    selector: Box<dyn Selector>,
}

impl PoolAdapter {
    /// Create a pool adapter.
    ///
    /// Fails with [`RouterError::Configuration`] if the member list is
    /// missing or empty; a pool with nothing to dispatch to is a
    /// configuration mistake, not a runtime condition.
    pub fn new(
        name: impl Into<String>,
        options: PoolOptions,
        factory: &dyn BackendFactory,
    ) -> Result<Self, RouterError> {
        let name = name.into();

        let sources = options
            .members
            .ok_or_else(|| RouterError::configuration("pool adapter requires a member list"))?;

        if sources.is_empty() {
            return Err(RouterError::configuration(
                "there are no backends in the pool member list",
            ));
        }

        let members = sources
            .into_iter()
            .map(|source| source.resolve(&name, factory))
            .collect::<Result<Vec<_>, RouterError>>()?;

        Ok(Self {
            name,
            members,
            selector: Box::new(RandomSelector),
        })
    }

    /// Replace the member selector.
    pub fn with_selector(mut self, selector: impl Selector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// All pool members, in construction order.
    pub fn members(&self) -> &[Arc<dyn Backend>] {
        &self.members
    }

    /// Number of pool members (always at least 1).
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    fn member(&self) -> &Arc<dyn Backend> {
        let index = self.selector.pick(self.members.len());
        let member = &self.members[index];
        tracing::trace!(
            adapter = %self.name,
            member = %member.name(),
            index,
            "Dispatching to pool member"
        );
        member
    }
}

#[async_trait]
impl Backend for PoolAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        POOL_KIND
    }

    async fn create(&self, record: &Record) -> Result<u64, BackendError> {
        self.member().create(record).await
    }

    async fn read(&self, query: &Query) -> Result<Vec<Record>, BackendError> {
        self.member().read(query).await
    }

    async fn update(&self, record: &Record) -> Result<u64, BackendError> {
        self.member().update(record).await
    }

    async fn delete(&self, record: &Record) -> Result<u64, BackendError> {
        self.member().delete(record).await
    }

    async fn aggregate(&self, query: &Query) -> Result<Value, BackendError> {
        self.member().aggregate(query).await
    }

    async fn execute(&self, operation: &str, args: Value) -> Result<Value, BackendError> {
        self.member().execute(operation, args).await
    }
}

impl std::fmt::Debug for PoolAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolAdapter")
            .field("name", &self.name)
            .field("members", &self.member_count())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::support::{FixedSelector, RecordingBackend};
    use super::*;
    use crate::backend::BackendRegistry;
    use crate::config::BackendConfig;
    use serde_json::json;

    fn build_pool(count: usize) -> (PoolAdapter, Vec<Arc<RecordingBackend>>) {
        let backends: Vec<Arc<RecordingBackend>> = (0..count)
            .map(|i| Arc::new(RecordingBackend::new(format!("member-{i}"))))
            .collect();
        let sources = backends
            .iter()
            .map(|b| BackendSource::from(b.clone() as Arc<dyn Backend>))
            .collect();
        let pool = PoolAdapter::new("test", PoolOptions::new(sources), &BackendRegistry::new())
            .unwrap();
        (pool, backends)
    }

    fn total_calls(backends: &[Arc<RecordingBackend>]) -> usize {
        backends.iter().map(|b| b.call_count()).sum()
    }

    #[tokio::test]
    async fn test_forced_index_selects_that_member() {
        let (pool, backends) = build_pool(2);
        let pool = pool.with_selector(FixedSelector(1));

        pool.create(&Record::new("users", json!({"id": 1})))
            .await
            .unwrap();

        assert!(backends[0].calls().is_empty());
        assert_eq!(backends[1].calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn test_forced_index_zero_selects_first_member() {
        let (pool, backends) = build_pool(2);
        let pool = pool.with_selector(FixedSelector(0));

        pool.aggregate(&Query::new("users")).await.unwrap();

        assert_eq!(backends[0].calls(), vec!["aggregate"]);
        assert!(backends[1].calls().is_empty());
    }

    #[tokio::test]
    async fn test_each_call_hits_exactly_one_member() {
        let (pool, backends) = build_pool(3);

        for _ in 0..10 {
            pool.read(&Query::new("users")).await.unwrap();
        }

        assert_eq!(total_calls(&backends), 10);
    }

    #[tokio::test]
    async fn test_random_dispatch_reaches_all_members() {
        let (pool, backends) = build_pool(2);

        // Independent uniform selection: over enough calls every member
        // serves at least once
        for _ in 0..100 {
            pool.read(&Query::new("users")).await.unwrap();
        }

        assert!(backends[0].call_count() > 0);
        assert!(backends[1].call_count() > 0);
    }

    #[tokio::test]
    async fn test_writes_and_unknown_operations_dispatch_like_reads() {
        let (pool, backends) = build_pool(2);
        let pool = pool.with_selector(FixedSelector(1));

        pool.update(&Record::new("users", json!({"id": 1})))
            .await
            .unwrap();
        pool.execute("prepare_statement", Value::Null).await.unwrap();

        assert!(backends[0].calls().is_empty());
        assert_eq!(backends[1].calls(), vec!["update", "prepare_statement"]);
    }

    #[tokio::test]
    async fn test_member_failure_propagates_verbatim() {
        let failing = Arc::new(RecordingBackend::new("member-0").failing());
        let pool = PoolAdapter::new(
            "test",
            PoolOptions::new(vec![BackendSource::from(failing as Arc<dyn Backend>)]),
            &BackendRegistry::new(),
        )
        .unwrap();

        let err = pool.read(&Query::new("users")).await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)));
    }

    #[test]
    fn test_missing_member_list_is_configuration_error() {
        let err = PoolAdapter::new("test", PoolOptions::default(), &BackendRegistry::new())
            .unwrap_err();
        assert!(matches!(err, RouterError::Configuration(_)));
    }

    #[test]
    fn test_empty_member_list_is_configuration_error() {
        let err = PoolAdapter::new(
            "test",
            PoolOptions::new(Vec::new()),
            &BackendRegistry::new(),
        )
        .unwrap_err();
        assert!(matches!(err, RouterError::Configuration(_)));
    }

    #[test]
    fn test_single_member_pool_is_valid() {
        let (pool, _backends) = build_pool(1);
        assert_eq!(pool.member_count(), 1);
    }

    #[test]
    fn test_construction_from_config_resolves_with_pool_name() {
        let pool = PoolAdapter::new(
            "reporting",
            PoolOptions::new(vec![
                BackendSource::from(BackendConfig::new("memory")),
                BackendSource::from(BackendConfig::new("memory")),
            ]),
            &BackendRegistry::with_defaults(),
        )
        .unwrap();

        assert_eq!(pool.member_count(), 2);
        assert!(pool.members().iter().all(|m| m.name() == "reporting"));
    }

    #[test]
    fn test_supports_matches_own_kind_only() {
        let (pool, _backends) = build_pool(2);
        assert!(pool.supports(POOL_KIND));
        assert!(!pool.supports("memory"));
    }

    #[test]
    fn test_random_selector_stays_in_bounds() {
        let selector = RandomSelector;
        for _ in 0..100 {
            assert!(selector.pick(3) < 3);
        }
    }
}
