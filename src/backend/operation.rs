//! Operation payloads and read/write classification
//!
//! The router answers one question per call: which backend serves this
//! operation. Classification is by operation name against an explicit
//! read set, so the split is visible and testable instead of implicit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operation names that never change binding state.
///
/// Everything outside this set is write-class, including operation names
/// the router has never heard of.
pub const READ_OPERATIONS: &[&str] = &["read", "aggregate"];

/// Classification of an operation name for routing purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Served by the currently bound reader; no state change
    Read,
    /// Served by the primary; binds subsequent reads to the primary
    Write,
}

impl OperationKind {
    /// Classify an operation name.
    ///
    /// Unknown names classify as `Write`: once an operation might have
    /// touched the primary, subsequent reads must see its effects.
    pub fn classify(operation: &str) -> Self {
        if READ_OPERATIONS.contains(&operation) {
            Self::Read
        } else {
            Self::Write
        }
    }

    pub fn is_read(self) -> bool {
        self == Self::Read
    }
}

/// A read or aggregate request against one collection.
///
/// The filter body is opaque to the router; it is handed to the selected
/// backend untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Query {
    /// Target collection (table, model, keyspace entry)
    pub collection: String,
    /// Backend-interpreted filter/criteria body
    #[serde(default)]
    pub filter: Value,
}

impl Query {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filter: Value::Null,
        }
    }

    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = filter;
        self
    }
}

/// A record payload for create/update/delete.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Record {
    /// Target collection (table, model, keyspace entry)
    pub collection: String,
    /// Backend-interpreted field body
    #[serde(default)]
    pub fields: Value,
}

impl Record {
    pub fn new(collection: impl Into<String>, fields: Value) -> Self {
        Self {
            collection: collection.into(),
            fields,
        }
    }
}
