//! S3 storage backend implementation

use super::super::config::S3Settings;
use super::super::error::{StorageError, StorageResult};
use super::super::traits::ObjectStore;
use super::super::types::{Destination, Location};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info};

/// S3 storage backend
pub struct S3Store {
    client: Arc<Client>,
}

impl S3Store {
    /// Create new S3 backend
    pub async fn new(settings: &S3Settings) -> StorageResult<Self> {
        info!("Initializing S3 backend at {}", settings.http_endpoint());

        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
            None,
            "pi-sampler-env",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(settings.http_endpoint())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::standard().with_max_attempts(settings.max_attempts))
            .timeout_config(
                TimeoutConfig::builder()
                    .connect_timeout(settings.connect_timeout)
                    .operation_timeout(settings.operation_timeout)
                    .build(),
            )
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.path_style_access)
            .build();

        Ok(Self {
            client: Arc::new(Client::from_conf(s3_config)),
        })
    }

    fn bucket_and_prefix(dest: &Destination) -> StorageResult<(&str, &str)> {
        match dest.location() {
            Location::S3 { bucket, prefix } => Ok((bucket.as_str(), prefix.as_str())),
            _ => Err(StorageError::configuration(format!(
                "{} is not an S3 destination",
                dest
            ))),
        }
    }

    /// Make an S3 key
    fn make_key(prefix: &str, name: &str) -> String {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        }
    }

    async fn list_keys(&self, bucket: &str, prefix: &str) -> StorageResult<Vec<String>> {
        let listing_prefix = Self::make_key(prefix, "");
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let page = self
                .client
                .list_objects_v2()
                .bucket(bucket)
                .prefix(&listing_prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| {
                    StorageError::request(format!("Failed to list s3://{}/{}: {}", bucket, prefix, e))
                })?;

            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );

            match page.next_continuation_token() {
                Some(token) if page.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(keys)
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn backend_name(&self) -> &'static str {
        "s3"
    }

    async fn list(&self, dest: &Destination) -> StorageResult<Vec<String>> {
        let (bucket, prefix) = Self::bucket_and_prefix(dest)?;
        let listing_prefix = Self::make_key(prefix, "");

        let mut names: Vec<String> = self
            .list_keys(bucket, prefix)
            .await?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&listing_prefix).map(str::to_string))
            .filter(|name| !name.is_empty() && !name.contains('/'))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn clear(&self, dest: &Destination) -> StorageResult<()> {
        let (bucket, prefix) = Self::bucket_and_prefix(dest)?;

        for key in self.list_keys(bucket, prefix).await? {
            debug!("Deleting s3://{}/{}", bucket, key);
            self.client
                .delete_object()
                .bucket(bucket)
                .key(&key)
                .send()
                .await
                .map_err(|e| StorageError::request(format!("Failed to delete {}: {}", key, e)))?;
        }

        Ok(())
    }

    async fn put(&self, dest: &Destination, name: &str, body: Bytes) -> StorageResult<()> {
        let (bucket, prefix) = Self::bucket_and_prefix(dest)?;
        let key = Self::make_key(prefix, name);
        debug!("Uploading {} bytes to s3://{}/{}", body.len(), bucket, key);

        self.client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::request(format!("Failed to upload {}: {}", key, e)))?;

        Ok(())
    }

    async fn get(&self, dest: &Destination, name: &str) -> StorageResult<Bytes> {
        let (bucket, prefix) = Self::bucket_and_prefix(dest)?;
        let key = Self::make_key(prefix, name);

        let result = self
            .client
            .get_object()
            .bucket(bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StorageError::not_found(format!("s3://{}/{}", bucket, key))
                } else {
                    StorageError::request(format!("Failed to download {}: {}", key, e))
                }
            })?;

        let body = result
            .body
            .collect()
            .await
            .map_err(|e| StorageError::request(format!("Failed to read {}: {}", key, e)))?;

        Ok(body.into_bytes())
    }
}
