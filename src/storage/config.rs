//! Storage configuration types and utilities
//!
//! Connection parameters for the object store and the lakehouse around it.
//! Everything is read from environment variables with fixed defaults that
//! target an in-cluster MinIO deployment.

use super::error::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_ACCESS_KEY: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_ENDPOINT: &str = "S3_ENDPOINT";
pub const ENV_SSL_ENABLE: &str = "S3_SSL_ENABLE";
pub const ENV_PATH_STYLE: &str = "S3_PATH_STYLE_ACCESS";
pub const ENV_MAX_ATTEMPTS: &str = "S3_ATTEMPTS_MAXIMUM";
pub const ENV_CONNECT_TIMEOUT: &str = "S3_CONNECTION_ESTABLISH_TIMEOUT";
pub const ENV_OPERATION_TIMEOUT: &str = "S3_CONNECTION_TIMEOUT";
pub const ENV_EVENT_LOG_DIR: &str = "SPARK_EVENT_LOG_DIR";
pub const ENV_WAREHOUSE: &str = "S3_WAREHOUSE";
pub const ENV_CATALOG_URI: &str = "ICEBERG_REST_CATALOG_URI";

const REDACTED: &str = "********";

/// S3-compatible endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Settings {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Host and port, without scheme
    pub endpoint: String,
    /// Signing region; MinIO accepts any value
    pub region: String,
    pub ssl_enabled: bool,
    pub path_style_access: bool,
    /// Total attempts per request; 1 means no retries
    pub max_attempts: u32,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub operation_timeout: Duration,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            access_key_id: "admin".to_string(),
            secret_access_key: "password".to_string(),
            endpoint: "minio.minio.svc.cluster.local:9000".to_string(),
            region: "us-east-1".to_string(),
            ssl_enabled: false,
            path_style_access: true,
            max_attempts: 1,
            connect_timeout: Duration::from_millis(5000),
            operation_timeout: Duration::from_millis(10000),
        }
    }
}

impl S3Settings {
    /// Endpoint URL with the scheme implied by the TLS flag
    pub fn http_endpoint(&self) -> String {
        if self.ssl_enabled {
            format!("https://{}", self.endpoint)
        } else {
            format!("http://{}", self.endpoint)
        }
    }
}

/// Everything the job knows about its storage environment
///
/// The event log directory, warehouse and catalog URI are carried for
/// display and for callers that register results elsewhere; the job itself
/// only writes through the S3 settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    pub s3: S3Settings,
    pub event_log_dir: String,
    pub warehouse: String,
    pub catalog_uri: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            s3: S3Settings::default(),
            event_log_dir: "s3a://spark-logs/logs".to_string(),
            warehouse: "s3a://lakehouse/".to_string(),
            catalog_uri: "http://iceberg-rest-catalog.catalog.svc.cluster.local:8181"
                .to_string(),
        }
    }
}

impl StorageSettings {
    /// Create configuration from environment variables
    pub fn from_env() -> StorageResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> StorageResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let s3 = S3Settings {
            access_key_id: text(ENV_ACCESS_KEY, &defaults.s3.access_key_id),
            secret_access_key: text(ENV_SECRET_KEY, &defaults.s3.secret_access_key),
            endpoint: text(ENV_ENDPOINT, &defaults.s3.endpoint),
            region: text(ENV_REGION, &defaults.s3.region),
            ssl_enabled: parse_flag(ENV_SSL_ENABLE, lookup(ENV_SSL_ENABLE), defaults.s3.ssl_enabled)?,
            path_style_access: parse_flag(
                ENV_PATH_STYLE,
                lookup(ENV_PATH_STYLE),
                defaults.s3.path_style_access,
            )?,
            max_attempts: parse_number(
                ENV_MAX_ATTEMPTS,
                lookup(ENV_MAX_ATTEMPTS),
                defaults.s3.max_attempts,
            )?,
            connect_timeout: parse_millis(
                ENV_CONNECT_TIMEOUT,
                lookup(ENV_CONNECT_TIMEOUT),
                defaults.s3.connect_timeout,
            )?,
            operation_timeout: parse_millis(
                ENV_OPERATION_TIMEOUT,
                lookup(ENV_OPERATION_TIMEOUT),
                defaults.s3.operation_timeout,
            )?,
        };

        if s3.max_attempts == 0 {
            return Err(StorageError::configuration(format!(
                "{} must be at least 1",
                ENV_MAX_ATTEMPTS
            )));
        }

        Ok(Self {
            s3,
            event_log_dir: text(ENV_EVENT_LOG_DIR, &defaults.event_log_dir),
            warehouse: text(ENV_WAREHOUSE, &defaults.warehouse),
            catalog_uri: text(ENV_CATALOG_URI, &defaults.catalog_uri),
        })
    }

    /// Copy with credentials masked, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.s3.secret_access_key = REDACTED.to_string();
        copy
    }
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> StorageResult<bool> {
    match value.as_deref().map(str::trim) {
        None => Ok(default),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(v) => Err(StorageError::configuration(format!(
            "{} must be 'true' or 'false', got '{}'",
            key, v
        ))),
    }
}

fn parse_number(key: &str, value: Option<String>, default: u32) -> StorageResult<u32> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| {
            StorageError::configuration(format!("{} must be a whole number, got '{}'", key, v))
        }),
    }
}

fn parse_millis(key: &str, value: Option<String>, default: Duration) -> StorageResult<Duration> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse::<u64>().map(Duration::from_millis).map_err(|_| {
            StorageError::configuration(format!("{} must be milliseconds, got '{}'", key, v))
        }),
    }
}
