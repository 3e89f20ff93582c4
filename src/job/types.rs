//! Value types flowing between the map, reduce and sink stages

use crate::error::{JobError, JobResult};
use serde::{Deserialize, Serialize};

/// Partial result reported by one worker task
///
/// Only constructible through [`SampleResult::new`], which enforces
/// `in_count <= total_count`. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleResult")]
pub struct SampleResult {
    in_count: u64,
    total_count: u64,
}

/// Unchecked wire form of [`SampleResult`]
#[derive(Deserialize)]
struct RawSampleResult {
    in_count: u64,
    total_count: u64,
}

impl TryFrom<RawSampleResult> for SampleResult {
    type Error = JobError;

    fn try_from(raw: RawSampleResult) -> Result<Self, Self::Error> {
        Self::new(raw.in_count, raw.total_count)
    }
}

impl SampleResult {
    /// Create a partial result, rejecting counts where more points matched
    /// than were drawn
    pub fn new(in_count: u64, total_count: u64) -> JobResult<Self> {
        if in_count > total_count {
            return Err(JobError::invalid_argument(format!(
                "in_count {} exceeds total_count {}",
                in_count, total_count
            )));
        }
        Ok(Self {
            in_count,
            total_count,
        })
    }

    /// Points that satisfied the predicate
    pub fn in_count(&self) -> u64 {
        self.in_count
    }

    /// Points drawn
    pub fn total_count(&self) -> u64 {
        self.total_count
    }
}

/// The single result of a completed job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    pub total_samples: u64,
    pub points_matched: u64,
    pub estimate: f64,
}
