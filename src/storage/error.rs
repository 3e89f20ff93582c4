//! Error types for the storage abstraction layer

use std::fmt;
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Destination URI could not be understood
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Backend rejected or failed the request
    #[error("Request failed: {0}")]
    Request(String),
}

impl StorageError {
    /// Create an invalid destination error
    pub fn invalid_destination<E: fmt::Display>(msg: E) -> Self {
        Self::InvalidDestination(msg.to_string())
    }

    /// Create a not found error
    pub fn not_found<E: fmt::Display>(item: E) -> Self {
        Self::NotFound(item.to_string())
    }

    /// Create a configuration error
    pub fn configuration<E: fmt::Display>(msg: E) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Create a connection error
    pub fn connection<E: fmt::Display>(msg: E) -> Self {
        Self::Connection(msg.to_string())
    }

    /// Create a request error
    pub fn request<E: fmt::Display>(msg: E) -> Self {
        Self::Request(msg.to_string())
    }
}
