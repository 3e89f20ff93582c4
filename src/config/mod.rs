//! Configuration for pi-sampler
//!
//! Job parameters come from the command line ([`JobConfig`]); connection
//! settings for the object store come from the environment
//! ([`StorageSettings`]).

pub mod job;

pub use crate::storage::{S3Settings, StorageSettings};
pub use job::{default_workers, JobConfig, DEFAULT_OUTPUT, DEFAULT_PARTITIONS, DEFAULT_SAMPLES};
