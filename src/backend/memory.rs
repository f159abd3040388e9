//! In-memory backend
//!
//! A minimal collection-to-rows store implementing the full [`Backend`]
//! contract. It exists so the registry, middleware, and demos have a
//! concrete routable target; it is not a storage engine.

use crate::backend::operation::{Query, Record};
use crate::backend::traits::Backend;
use crate::error::BackendError;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::RwLock;

/// Backend kind tag for [`MemoryBackend`]
pub const MEMORY_KIND: &str = "memory";

/// A trivial in-memory backend keyed by collection name.
#[derive(Debug)]
pub struct MemoryBackend {
    name: String,
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Number of rows currently stored in a collection
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .expect("collections lock poisoned")
            .get(collection)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    fn matches(row: &Value, filter: &Value) -> bool {
        match filter.as_object() {
            Some(criteria) => criteria
                .iter()
                .all(|(key, expected)| row.get(key) == Some(expected)),
            // Null or non-object filter selects everything
            None => true,
        }
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        MEMORY_KIND
    }

    async fn create(&self, record: &Record) -> Result<u64, BackendError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| BackendError::Unavailable("collections lock poisoned".to_string()))?;
        collections
            .entry(record.collection.clone())
            .or_default()
            .push(record.fields.clone());
        Ok(1)
    }

    async fn read(&self, query: &Query) -> Result<Vec<Record>, BackendError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| BackendError::Unavailable("collections lock poisoned".to_string()))?;
        let rows = collections
            .get(&query.collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| Self::matches(row, &query.filter))
                    .map(|row| Record::new(&query.collection, row.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(rows)
    }

    async fn update(&self, record: &Record) -> Result<u64, BackendError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| BackendError::Unavailable("collections lock poisoned".to_string()))?;
        let rows = collections.entry(record.collection.clone()).or_default();
        for row in rows.iter_mut() {
            if let (Some(target), Some(updates)) = (row.as_object_mut(), record.fields.as_object())
            {
                for (key, value) in updates {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(rows.len() as u64)
    }

    async fn delete(&self, record: &Record) -> Result<u64, BackendError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| BackendError::Unavailable("collections lock poisoned".to_string()))?;
        let removed = collections
            .remove(&record.collection)
            .map(|rows| rows.len())
            .unwrap_or(0);
        Ok(removed as u64)
    }

    async fn aggregate(&self, query: &Query) -> Result<Value, BackendError> {
        let matched = self.read(query).await?;
        Ok(json!({ "count": matched.len() }))
    }

    async fn execute(&self, operation: &str, _args: Value) -> Result<Value, BackendError> {
        match operation {
            "truncate" => {
                let mut collections = self.collections.write().map_err(|_| {
                    BackendError::Unavailable("collections lock poisoned".to_string())
                })?;
                collections.clear();
                Ok(Value::Null)
            }
            "collections" => {
                let collections = self.collections.read().map_err(|_| {
                    BackendError::Unavailable("collections lock poisoned".to_string())
                })?;
                let mut names: Vec<&String> = collections.keys().collect();
                names.sort();
                Ok(json!(names))
            }
            _ => Err(BackendError::UnsupportedOperation(operation.to_string())),
        }
    }
}
