//! Core trait definitions for the storage abstraction layer

use async_trait::async_trait;
use bytes::Bytes;

use super::error::StorageResult;
use super::types::Destination;

/// Object storage holding result datasets
///
/// A dataset is the flat set of named objects under one destination.
/// Every call is a single attempt; backends do not retry.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Short backend name used in logs
    fn backend_name(&self) -> &'static str;

    /// List object names under the destination, sorted
    async fn list(&self, dest: &Destination) -> StorageResult<Vec<String>>;

    /// Remove every object under the destination
    async fn clear(&self, dest: &Destination) -> StorageResult<()>;

    /// Store one object, replacing any object of the same name
    async fn put(&self, dest: &Destination, name: &str, body: Bytes) -> StorageResult<()>;

    /// Fetch one object
    async fn get(&self, dest: &Destination, name: &str) -> StorageResult<Bytes>;
}
