//! Pure partition planning for sampling jobs
//!
//! Splits the logical index space `[0, n)` into contiguous ranges, one per
//! worker task. No I/O happens here.

use crate::error::{JobError, JobResult};
use serde::{Deserialize, Serialize};

/// A contiguous, half-open range of sample indices assigned to one task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    /// First index covered by this partition
    pub start: u64,
    /// One past the last index covered by this partition
    pub end: u64,
    /// Position of this partition in the plan
    pub index: usize,
}

impl Partition {
    /// Number of samples this partition covers; zero when `end < start`
    pub fn size(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

/// Pure: Plan `partitions` near-equal contiguous ranges covering `[0, total)`
///
/// The first `total % partitions` ranges receive one extra item, so sizes
/// never differ by more than one.
pub fn partition_range(total: u64, partitions: usize) -> JobResult<Vec<Partition>> {
    if total == 0 {
        return Err(JobError::invalid_argument(
            "sample count must be greater than zero",
        ));
    }
    if partitions == 0 {
        return Err(JobError::invalid_argument(
            "partition count must be greater than zero",
        ));
    }
    if partitions as u64 > total {
        return Err(JobError::invalid_argument(format!(
            "partition count {} exceeds sample count {}",
            partitions, total
        )));
    }

    let count = partitions as u64;
    let base = total / count;
    let remainder = total % count;

    let mut plan = Vec::with_capacity(partitions);
    let mut start = 0;
    for index in 0..partitions {
        let size = if (index as u64) < remainder {
            base + 1
        } else {
            base
        };
        plan.push(Partition {
            start,
            end: start + size,
            index,
        });
        start += size;
    }

    Ok(plan)
}
