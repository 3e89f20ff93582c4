//! The estimation job
//!
//! A map-reduce over a half-open range of sample indices:
//!
//! - [`partition`] splits `[0, samples)` into contiguous chunks
//! - [`sampler`] is the map function run once per chunk
//! - [`pool`] schedules map tasks across a fixed set of workers
//! - [`aggregate`] reduces the partial counts into the final estimate
//! - [`pipeline`] drives all of it and hands the result to the sink

pub mod aggregate;
pub mod partition;
pub mod pipeline;
pub mod pool;
pub mod sampler;
pub mod types;

pub use aggregate::{aggregate, combine};
pub use partition::{partition_range, Partition};
pub use pipeline::{JobReport, Pipeline};
pub use pool::WorkerPool;
pub use sampler::{in_unit_circle, run_partition, sample_partition, RandomSource};
pub use types::{FinalResult, SampleResult};
