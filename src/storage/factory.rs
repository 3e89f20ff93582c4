//! Storage factory for creating object stores

use super::backends::{FileStore, MemoryStore};
#[cfg(feature = "s3")]
use super::backends::S3Store;
use super::config::StorageSettings;
use super::error::StorageResult;
use super::traits::ObjectStore;
use super::types::{Destination, Location};
use std::sync::Arc;
use tracing::debug;

/// Factory for creating storage instances
pub struct StoreFactory;

impl StoreFactory {
    /// Create the backend that serves `dest`
    pub async fn for_destination(
        dest: &Destination,
        settings: &StorageSettings,
    ) -> StorageResult<Arc<dyn ObjectStore>> {
        let store: Arc<dyn ObjectStore> = match dest.location() {
            Location::File(_) => Arc::new(FileStore::new()),
            Location::Memory(_) => Arc::new(MemoryStore::new()),
            #[cfg(feature = "s3")]
            Location::S3 { .. } => Arc::new(S3Store::new(&settings.s3).await?),
            #[cfg(not(feature = "s3"))]
            Location::S3 { .. } => {
                let _ = settings;
                return Err(super::error::StorageError::configuration(format!(
                    "{} needs the S3 backend. Rebuild with --features s3",
                    dest
                )));
            }
        };

        debug!("Using {} backend for {}", store.backend_name(), dest);
        Ok(store)
    }
}
