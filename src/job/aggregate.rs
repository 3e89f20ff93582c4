//! Reduction of partial sample results
//!
//! Combining is a plain sum over both counters, so the order in which
//! partitions report has no effect on the final result.

use super::types::{FinalResult, SampleResult};
use crate::error::{JobError, JobResult};
use tracing::debug;

/// Pure: Combine two partial results
pub fn combine(a: SampleResult, b: SampleResult) -> JobResult<SampleResult> {
    let overflow = || JobError::invalid_argument("sample counts overflow u64");
    SampleResult::new(
        a.in_count().checked_add(b.in_count()).ok_or_else(overflow)?,
        a.total_count()
            .checked_add(b.total_count())
            .ok_or_else(overflow)?,
    )
}

/// Pure: Reduce every partial result into the job's final result
///
/// Callers must pass the complete set of partition results; there is no
/// partial finalization.
pub fn aggregate(results: &[SampleResult]) -> JobResult<FinalResult> {
    let zero = SampleResult::new(0, 0)?;
    let totals = results
        .iter()
        .try_fold(zero, |acc, result| combine(acc, *result))?;

    if totals.total_count() == 0 {
        return Err(JobError::DivisionByZero);
    }

    let estimate = 4.0 * totals.in_count() as f64 / totals.total_count() as f64;
    debug!(
        "Aggregated {} partitions: {} of {} points matched",
        results.len(),
        totals.in_count(),
        totals.total_count()
    );

    Ok(FinalResult {
        total_samples: totals.total_count(),
        points_matched: totals.in_count(),
        estimate,
    })
}
