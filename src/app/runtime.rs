//! Runtime initialization and setup

use crate::app::{config::AppConfig, logging::init_logging};
use crate::config::StorageSettings;
use crate::error::{ErrorCode, JobError, JobResult};
use crate::storage::{Destination, Location};
use tracing::debug;

/// Initialize the application with proper logging
pub fn initialize_app(config: &AppConfig) {
    init_logging(config);
}

/// Load storage settings from the environment
pub fn load_storage_settings() -> JobResult<StorageSettings> {
    let settings = StorageSettings::from_env().map_err(|e| {
        JobError::configuration_with_code(ErrorCode::CONFIG_INVALID_VALUE, e.to_string())
    })?;
    debug!("Object store endpoint: {}", settings.s3.http_endpoint());
    Ok(settings)
}

/// Settings needed to open `dest`
///
/// Only S3 destinations read the environment; local and in-memory
/// destinations never fail on malformed S3 variables.
pub fn storage_settings_for(dest: &Destination) -> JobResult<StorageSettings> {
    match dest.location() {
        Location::S3 { .. } => load_storage_settings(),
        Location::File(_) | Location::Memory(_) => Ok(StorageSettings::default()),
    }
}
