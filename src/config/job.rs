//! Job configuration
//!
//! Parameters of one estimation run, assembled from CLI flags and validated
//! before any work is scheduled.

use crate::error::{ErrorCode, JobError, JobResult};
use crate::job::RandomSource;
use crate::storage::{Destination, WriteMode};
use std::time::Duration;

/// Samples drawn when none are requested
pub const DEFAULT_SAMPLES: u64 = 100_000_000;
/// Partitions the sample range is split into by default
pub const DEFAULT_PARTITIONS: usize = 200;
/// Where results go by default
pub const DEFAULT_OUTPUT: &str = "s3a://lakehouse/pi_estimation_results";

/// Configuration of a single estimation job
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub samples: u64,
    pub partitions: usize,
    /// Worker agents in the map pool
    pub workers: usize,
    pub random: RandomSource,
    /// Per-partition time limit; unlimited when `None`
    pub task_timeout: Option<Duration>,
    pub output: Destination,
    pub mode: WriteMode,
}

impl JobConfig {
    /// Create a configuration with default workers, entropy seeding and
    /// overwrite mode
    pub fn new(samples: u64, partitions: usize, output: Destination) -> Self {
        Self {
            samples,
            partitions,
            workers: default_workers(),
            random: RandomSource::Entropy,
            task_timeout: None,
            output,
            mode: WriteMode::Overwrite,
        }
    }

    /// Parse `output` and build a configuration from it
    pub fn from_output_uri(samples: u64, partitions: usize, output: &str) -> JobResult<Self> {
        let output = Destination::parse(output).map_err(|e| {
            JobError::configuration_with_code(ErrorCode::CONFIG_UNSUPPORTED_SCHEME, e.to_string())
        })?;
        Ok(Self::new(samples, partitions, output))
    }

    /// Set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Use reproducible sampling from `seed`, or OS entropy when `None`
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.random = seed.map_or(RandomSource::Entropy, RandomSource::Seeded);
        self
    }

    /// Limit how long a single partition may run
    pub fn with_task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    /// Set the write mode
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check the configuration before any work is scheduled
    pub fn validate(&self) -> JobResult<()> {
        if self.samples == 0 {
            return Err(JobError::invalid_argument("--samples must be at least 1"));
        }
        if self.partitions == 0 {
            return Err(JobError::invalid_argument("--partitions must be at least 1"));
        }
        if self.partitions as u64 > self.samples {
            return Err(JobError::invalid_argument(format!(
                "--partitions ({}) cannot exceed --samples ({})",
                self.partitions, self.samples
            )));
        }
        if self.samples > i64::MAX as u64 {
            return Err(JobError::invalid_argument(
                "--samples exceeds the int64 range of the result table",
            ));
        }
        if self.workers == 0 {
            return Err(JobError::invalid_argument("--workers must be at least 1"));
        }
        if self.task_timeout == Some(Duration::ZERO) {
            return Err(JobError::configuration_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "--task-timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// One worker per available CPU
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(samples: u64, partitions: usize) -> JobConfig {
        JobConfig::from_output_uri(samples, partitions, "memory://pi").unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = config(DEFAULT_SAMPLES, DEFAULT_PARTITIONS);
        assert_eq!(cfg.random, RandomSource::Entropy);
        assert_eq!(cfg.mode, WriteMode::Overwrite);
        assert!(cfg.workers >= 1);
        assert!(cfg.task_timeout.is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn test_default_output_parses() {
        let cfg = JobConfig::from_output_uri(1, 1, DEFAULT_OUTPUT).unwrap();
        assert_eq!(cfg.output.uri(), DEFAULT_OUTPUT);
    }

    #[test]
    fn test_with_seed() {
        let cfg = config(10, 2).with_seed(Some(5));
        assert_eq!(cfg.random, RandomSource::Seeded(5));
        let cfg = cfg.with_seed(None);
        assert_eq!(cfg.random, RandomSource::Entropy);
    }

    #[test]
    fn test_rejects_bad_counts() {
        assert!(matches!(
            config(0, 1).validate(),
            Err(JobError::InvalidArgument { .. })
        ));
        assert!(matches!(
            config(10, 0).validate(),
            Err(JobError::InvalidArgument { .. })
        ));
        assert!(matches!(
            config(3, 4).validate(),
            Err(JobError::InvalidArgument { .. })
        ));
        assert!(matches!(
            config(10, 2).with_workers(0).validate(),
            Err(JobError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = config(10, 2)
            .with_task_timeout(Some(Duration::ZERO))
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
    }

    #[test]
    fn test_rejects_unknown_scheme() {
        let err = JobConfig::from_output_uri(10, 2, "gs://bucket/x").unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_UNSUPPORTED_SCHEME);
    }
}
