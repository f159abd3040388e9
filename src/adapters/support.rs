//! Test doubles shared by the adapter tests.

use crate::adapters::pool::Selector;
use crate::backend::operation::{Query, Record};
use crate::backend::traits::Backend;
use crate::error::BackendError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

/// A backend that records every operation name it serves.
#[derive(Debug)]
pub struct RecordingBackend {
    name: String,
    kind: String,
    extra_kinds: Vec<String>,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl RecordingBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "recording".to_string(),
            extra_kinds: Vec::new(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Report this additional kind from `supports`
    pub fn supporting(mut self, kind: impl Into<String>) -> Self {
        self.extra_kinds.push(kind.into());
        self
    }

    /// Fail every operation with `BackendError::Unavailable`
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, operation: &str) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(operation.to_string());
        if self.fail {
            Err(BackendError::Unavailable(format!("{} is down", self.name)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn supports(&self, kind: &str) -> bool {
        kind == self.kind || self.extra_kinds.iter().any(|k| k == kind)
    }

    async fn create(&self, _record: &Record) -> Result<u64, BackendError> {
        self.record("create")?;
        Ok(1)
    }

    async fn read(&self, _query: &Query) -> Result<Vec<Record>, BackendError> {
        self.record("read")?;
        Ok(Vec::new())
    }

    async fn update(&self, _record: &Record) -> Result<u64, BackendError> {
        self.record("update")?;
        Ok(1)
    }

    async fn delete(&self, _record: &Record) -> Result<u64, BackendError> {
        self.record("delete")?;
        Ok(1)
    }

    async fn aggregate(&self, _query: &Query) -> Result<Value, BackendError> {
        self.record("aggregate")?;
        Ok(json!({"count": 0}))
    }

    async fn execute(&self, operation: &str, _args: Value) -> Result<Value, BackendError> {
        self.record(operation)?;
        Ok(Value::Null)
    }
}

/// A selector that always returns the same index.
pub struct FixedSelector(pub usize);

impl Selector for FixedSelector {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}
