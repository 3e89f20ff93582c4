//! Storage abstraction layer
//!
//! Result datasets are written as named objects under a destination URI.
//! Backends cover the local filesystem, an in-process map and (with the
//! `s3` feature) any S3-compatible endpoint.

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod traits;
pub mod types;

pub use backends::{FileStore, MemoryStore};
pub use config::{S3Settings, StorageSettings};
pub use error::{StorageError, StorageResult};
pub use factory::StoreFactory;
pub use traits::ObjectStore;
pub use types::{Destination, Location, WriteMode};
