//! Job driver
//!
//! Plans partitions, runs the map phase on the worker pool, reduces the
//! partial counts and commits the result. Any error aborts the job before
//! anything is written.

use super::aggregate::aggregate;
use super::partition::{partition_range, Partition};
use super::pool::WorkerPool;
use super::sampler::run_partition;
use super::types::FinalResult;
use crate::config::JobConfig;
use crate::error::JobResult;
use crate::sink::ResultSink;
use crate::storage::{Destination, ObjectStore};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// Summary of a committed job
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub result: FinalResult,
    pub destination: String,
    pub partitions: usize,
    pub workers: usize,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
}

/// Runs one estimation job end to end
pub struct Pipeline {
    config: JobConfig,
    pool: WorkerPool,
    sink: ResultSink,
}

impl Pipeline {
    /// Validate `config` and wire the pool and sink around `store`
    pub fn new(config: JobConfig, store: Arc<dyn ObjectStore>) -> JobResult<Self> {
        config.validate()?;
        let pool = WorkerPool::new(config.workers).with_task_timeout(config.task_timeout);
        let sink = ResultSink::new(store).with_mode(config.mode);
        Ok(Self { config, pool, sink })
    }

    /// The validated configuration
    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Partitions the map phase will run
    pub fn plan(&self) -> JobResult<Vec<Partition>> {
        partition_range(self.config.samples, self.config.partitions)
    }

    /// Map and reduce without touching the destination
    #[instrument(skip(self), fields(samples = self.config.samples, partitions = self.config.partitions))]
    pub async fn estimate(&self) -> JobResult<FinalResult> {
        let plan = self.plan()?;
        let source = self.config.random;
        let partials = self
            .pool
            .run(plan, move |partition| run_partition(partition, &source))
            .await?;
        aggregate(&partials)
    }

    /// Write `result` to the configured destination
    pub async fn commit(&self, result: &FinalResult) -> JobResult<()> {
        self.sink.write(result, &self.config.output).await
    }

    /// Estimate, then commit
    pub async fn run(&self) -> JobResult<JobReport> {
        let started = Instant::now();
        info!(
            "Estimating pi from {} samples in {} partitions",
            self.config.samples, self.config.partitions
        );

        let result = self.estimate().await?;
        info!(
            "Reduced {} partitions: {} of {} points inside the circle",
            self.config.partitions, result.points_matched, result.total_samples
        );
        self.commit(&result).await?;

        Ok(JobReport {
            result,
            destination: self.config.output.uri().to_string(),
            partitions: self.config.partitions,
            workers: self.pool.workers().min(self.config.partitions),
            elapsed: started.elapsed(),
        })
    }

    /// Where results are written
    pub fn destination(&self) -> &Destination {
        &self.config.output
    }
}
