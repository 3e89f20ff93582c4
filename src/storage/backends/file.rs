//! Local filesystem storage backend implementation

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::storage::{
    error::{StorageError, StorageResult},
    traits::ObjectStore,
    types::{Destination, Location},
};

/// Stores each dataset as a directory of files
#[derive(Debug, Default, Clone)]
pub struct FileStore;

impl FileStore {
    /// Create a new file backend
    pub fn new() -> Self {
        Self
    }

    fn dir_for<'a>(&self, dest: &'a Destination) -> StorageResult<&'a Path> {
        match dest.location() {
            Location::File(path) => Ok(path.as_path()),
            _ => Err(StorageError::configuration(format!(
                "{} is not a filesystem destination",
                dest
            ))),
        }
    }

    fn object_path(dir: &Path, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
            return Err(StorageError::invalid_destination(format!(
                "invalid object name '{}'",
                name
            )));
        }
        Ok(dir.join(name))
    }
}

#[async_trait]
impl ObjectStore for FileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn list(&self, dest: &Destination) -> StorageResult<Vec<String>> {
        let dir = self.dir_for(dest)?;
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn clear(&self, dest: &Destination) -> StorageResult<()> {
        let dir = self.dir_for(dest)?;
        match fs::remove_dir_all(dir).await {
            Ok(()) => {
                debug!("Removed existing dataset at {}", dir.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, dest: &Destination, name: &str, body: Bytes) -> StorageResult<()> {
        let dir = self.dir_for(dest)?;
        fs::create_dir_all(dir).await?;
        let path = Self::object_path(dir, name)?;

        let mut file = fs::File::create(&path).await?;
        file.write_all(&body).await?;
        file.flush().await?;
        debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(())
    }

    async fn get(&self, dest: &Destination, name: &str) -> StorageResult<Bytes> {
        let dir = self.dir_for(dest)?;
        let path = Self::object_path(dir, name)?;
        match fs::read(&path).await {
            Ok(content) => Ok(Bytes::from(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::not_found(path.display()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
