//! In-memory storage backend for testing

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::{
    error::{StorageError, StorageResult},
    traits::ObjectStore,
    types::{Destination, Location},
};

type Datasets = HashMap<String, BTreeMap<String, Bytes>>;

/// In-memory storage backend for testing
///
/// Clones share the same datasets, so a handle kept by a test observes
/// writes made through the pipeline.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    datasets: Arc<RwLock<Datasets>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn key_for(dest: &Destination) -> StorageResult<String> {
        match dest.location() {
            Location::Memory(name) => Ok(name.clone()),
            _ => Err(StorageError::configuration(format!(
                "{} is not a memory destination",
                dest
            ))),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, dest: &Destination) -> StorageResult<Vec<String>> {
        let key = Self::key_for(dest)?;
        let datasets = self.datasets.read().await;
        Ok(datasets
            .get(&key)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn clear(&self, dest: &Destination) -> StorageResult<()> {
        let key = Self::key_for(dest)?;
        self.datasets.write().await.remove(&key);
        Ok(())
    }

    async fn put(&self, dest: &Destination, name: &str, body: Bytes) -> StorageResult<()> {
        let key = Self::key_for(dest)?;
        self.datasets
            .write()
            .await
            .entry(key)
            .or_default()
            .insert(name.to_string(), body);
        Ok(())
    }

    async fn get(&self, dest: &Destination, name: &str) -> StorageResult<Bytes> {
        let key = Self::key_for(dest)?;
        let datasets = self.datasets.read().await;
        datasets
            .get(&key)
            .and_then(|objects| objects.get(name))
            .cloned()
            .ok_or_else(|| StorageError::not_found(format!("{}/{}", dest, name)))
    }
}
