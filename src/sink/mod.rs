//! Result sink
//!
//! Encodes the final result as a one-row Parquet dataset and commits it to
//! an object store. A committed dataset holds the data object plus an empty
//! `_SUCCESS` marker written last.

pub mod codec;
pub mod record;

pub use codec::{decode_records, encode_records, result_schema, RecordCodecError};
pub use record::ResultRecord;

use crate::error::{JobError, JobResult};
use crate::job::FinalResult;
use crate::storage::{Destination, ObjectStore, WriteMode};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info};

/// Name of the data object inside a dataset
pub const DATA_OBJECT: &str = "part-00000.parquet";
/// Marker written after the data object
pub const SUCCESS_MARKER: &str = "_SUCCESS";

/// Writes job results through an [`ObjectStore`]
#[derive(Clone)]
pub struct ResultSink {
    store: Arc<dyn ObjectStore>,
    mode: WriteMode,
}

impl ResultSink {
    /// Create a sink that overwrites its destination
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            mode: WriteMode::Overwrite,
        }
    }

    /// Choose how existing data at the destination is treated
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured write mode
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Write `result` as the only row at `dest`
    ///
    /// The record is encoded before the destination is touched, so an
    /// encoding failure leaves prior contents in place. Any store failure is
    /// reported as a write error; nothing is rolled back.
    pub async fn write(&self, result: &FinalResult, dest: &Destination) -> JobResult<()> {
        let record = ResultRecord::try_from(result)?;
        let body = encode_records(&[record]).map_err(|e| {
            JobError::write(dest.uri(), "failed to encode result record").with_source(e)
        })?;

        match self.mode {
            WriteMode::Overwrite => {
                self.store.clear(dest).await.map_err(|e| {
                    JobError::write(dest.uri(), "failed to remove previous contents").with_source(e)
                })?;
            }
            WriteMode::ErrorIfExists => {
                let existing = self.store.list(dest).await.map_err(|e| {
                    JobError::write(dest.uri(), "failed to inspect destination").with_source(e)
                })?;
                if !existing.is_empty() {
                    return Err(JobError::write(
                        dest.uri(),
                        format!("destination already holds {} objects", existing.len()),
                    ));
                }
            }
        }

        debug!(
            "Writing {} bytes to {} via {} backend",
            body.len(),
            dest,
            self.store.backend_name()
        );
        self.store
            .put(dest, DATA_OBJECT, body)
            .await
            .map_err(|e| JobError::write(dest.uri(), "failed to write data object").with_source(e))?;
        self.store
            .put(dest, SUCCESS_MARKER, Bytes::new())
            .await
            .map_err(|e| {
                JobError::write(dest.uri(), "failed to write success marker").with_source(e)
            })?;

        info!("Committed result to {} ({} mode)", dest, self.mode);
        Ok(())
    }

    /// Read back every row stored at `dest`
    pub async fn read(&self, dest: &Destination) -> JobResult<Vec<ResultRecord>> {
        let names = self
            .store
            .list(dest)
            .await
            .map_err(|e| JobError::read(dest.uri(), "failed to list objects").with_source(e))?;

        if !names.iter().any(|n| n == SUCCESS_MARKER) {
            return Err(JobError::read(dest.uri(), "no committed dataset found"));
        }

        let mut records = Vec::new();
        for name in names.iter().filter(|n| n.ends_with(".parquet")) {
            let body = self.store.get(dest, name).await.map_err(|e| {
                JobError::read(dest.uri(), format!("failed to fetch {}", name)).with_source(e)
            })?;
            let rows = decode_records(body).map_err(|e| {
                JobError::read(dest.uri(), format!("failed to decode {}", name)).with_source(e)
            })?;
            records.extend(rows);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError, StorageResult};
    use async_trait::async_trait;

    fn result(total: u64, matched: u64) -> FinalResult {
        FinalResult {
            total_samples: total,
            points_matched: matched,
            estimate: 4.0 * matched as f64 / total as f64,
        }
    }

    /// Store that fails every mutation
    struct ReadOnlyStore;

    #[async_trait]
    impl ObjectStore for ReadOnlyStore {
        fn backend_name(&self) -> &'static str {
            "read-only"
        }

        async fn list(&self, _dest: &Destination) -> StorageResult<Vec<String>> {
            Ok(Vec::new())
        }

        async fn clear(&self, _dest: &Destination) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )))
        }

        async fn put(&self, _dest: &Destination, _name: &str, _body: Bytes) -> StorageResult<()> {
            Err(StorageError::connection("network unreachable"))
        }

        async fn get(&self, dest: &Destination, name: &str) -> StorageResult<Bytes> {
            Err(StorageError::not_found(format!("{}/{}", dest, name)))
        }
    }

    #[tokio::test]
    async fn test_write_commits_data_and_marker() {
        let store = MemoryStore::new();
        let sink = ResultSink::new(Arc::new(store.clone()));
        let dest = Destination::parse("memory://pi").unwrap();

        sink.write(&result(8, 6), &dest).await.unwrap();

        assert_eq!(
            store.list(&dest).await.unwrap(),
            vec![SUCCESS_MARKER.to_string(), DATA_OBJECT.to_string()]
        );
        let rows = sink.read(&dest).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_samples, 8);
        assert_eq!(rows[0].points_in_circle, 6);
        assert_eq!(rows[0].pi_estimate, 3.0);
    }

    #[tokio::test]
    async fn test_overwrite_keeps_only_last_write() {
        let store = MemoryStore::new();
        let sink = ResultSink::new(Arc::new(store.clone()));
        let dest = Destination::parse("memory://pi").unwrap();

        store
            .put(&dest, "stale.parquet", encode_records(&[]).unwrap())
            .await
            .unwrap();
        sink.write(&result(10, 7), &dest).await.unwrap();
        sink.write(&result(20, 15), &dest).await.unwrap();

        let rows = sink.read(&dest).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_samples, 20);
        assert_eq!(rows[0].points_in_circle, 15);
        assert!(!store
            .list(&dest)
            .await
            .unwrap()
            .contains(&"stale.parquet".to_string()));
    }

    #[tokio::test]
    async fn test_error_if_exists_refuses_second_write() {
        let store = MemoryStore::new();
        let sink = ResultSink::new(Arc::new(store)).with_mode(WriteMode::ErrorIfExists);
        let dest = Destination::parse("memory://pi").unwrap();

        sink.write(&result(10, 7), &dest).await.unwrap();
        let err = sink.write(&result(20, 15), &dest).await.unwrap_err();
        assert!(matches!(err, JobError::Write { .. }));

        let rows = sink.read(&dest).await.unwrap();
        assert_eq!(rows[0].total_samples, 10);
    }

    #[tokio::test]
    async fn test_store_failure_is_write_error() {
        let sink = ResultSink::new(Arc::new(ReadOnlyStore));
        let dest = Destination::parse("memory://pi").unwrap();

        let err = sink.write(&result(4, 3), &dest).await.unwrap_err();
        match &err {
            JobError::Write { destination, .. } => assert_eq!(destination, "memory://pi"),
            other => panic!("expected write error, got {other}"),
        }
        assert!(err.developer_message().contains("permission denied"));
    }

    #[tokio::test]
    async fn test_read_requires_committed_dataset() {
        let sink = ResultSink::new(Arc::new(MemoryStore::new()));
        let dest = Destination::parse("memory://empty").unwrap();

        let err = sink.read(&dest).await.unwrap_err();
        assert!(matches!(err, JobError::Read { .. }));
    }
}
