//! # pi-sampler
//!
//! Estimates pi by Monte Carlo sampling, split into partitions that a pool
//! of workers samples in parallel, and stores the single-row result as a
//! Parquet dataset.
//!
//! ## Usage
//!
//! ```bash
//! pi-sampler run [--samples N] [--partitions P] [--output URI] [--seed S]
//! pi-sampler inspect <URI>
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging, runtime setup and fatal error reporting
//! - `cli` - Argument parsing and command routing
//! - `config` - Job parameters and environment-driven storage settings
//! - `error` - Job error taxonomy with stable error codes
//! - `job` - Partitioning, sampling, the worker pool and aggregation
//! - `sink` - Parquet encoding and committed result datasets
//! - `storage` - Object store backends (local files, memory, S3)
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod job;
pub mod sink;
pub mod storage;

pub use config::JobConfig;
pub use error::{JobError, JobResult};
pub use job::{FinalResult, Pipeline, SampleResult};
