//! Per-partition Monte Carlo sampling
//!
//! The map function of the job: draw points in the square `[-1, 1)²` and
//! count how many land inside the unit circle.

use super::partition::Partition;
use super::types::SampleResult;
use crate::error::{JobError, JobResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Where worker tasks get their randomness from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "seed")]
pub enum RandomSource {
    /// Fresh OS entropy for every partition
    #[default]
    Entropy,
    /// Reproducible streams derived from a base seed and the partition index
    Seeded(u64),
}

impl RandomSource {
    /// Build the generator for one partition
    ///
    /// Seeded streams depend only on `(seed, partition.index)`, never on which
    /// worker picks the partition up.
    pub fn rng_for(&self, partition: &Partition) -> JobResult<StdRng> {
        match self {
            Self::Seeded(seed) => Ok(StdRng::seed_from_u64(derive_seed(
                *seed,
                partition.index as u64,
            ))),
            Self::Entropy => StdRng::try_from_os_rng().map_err(|e| {
                JobError::generation(
                    partition.index,
                    format!("OS entropy source unavailable: {}", e),
                )
            }),
        }
    }
}

/// SplitMix64 finalizer over the base seed and stream index
fn derive_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Predicate evaluated for every drawn point
#[inline]
pub fn in_unit_circle(x: f64, y: f64) -> bool {
    x * x + y * y <= 1.0
}

/// Pure: sample every index in `partition` using `rng`
pub fn sample_partition<R: Rng + ?Sized>(
    partition: &Partition,
    rng: &mut R,
) -> JobResult<SampleResult> {
    let total = partition.size();
    let mut inside = 0u64;
    for _ in 0..total {
        let x: f64 = rng.random_range(-1.0..1.0);
        let y: f64 = rng.random_range(-1.0..1.0);
        if in_unit_circle(x, y) {
            inside += 1;
        }
    }

    SampleResult::new(inside, total)
}

/// Run the map function for one partition with the configured randomness
pub fn run_partition(partition: &Partition, source: &RandomSource) -> JobResult<SampleResult> {
    let mut rng = source.rng_for(partition)?;
    sample_partition(partition, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(index: usize, start: u64, end: u64) -> Partition {
        Partition { start, end, index }
    }

    #[test]
    fn test_predicate_boundary() {
        assert!(in_unit_circle(0.0, 0.0));
        assert!(in_unit_circle(1.0, 0.0));
        assert!(in_unit_circle(-0.6, 0.8));
        assert!(!in_unit_circle(0.8, 0.8));
        assert!(!in_unit_circle(-1.0, -1.0));
    }

    #[test]
    fn test_counts_are_bounded_by_partition_size() {
        let p = partition(0, 100, 1_100);
        let result = run_partition(&p, &RandomSource::Seeded(7)).unwrap();
        assert_eq!(result.total_count(), 1_000);
        assert!(result.in_count() <= result.total_count());
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let p = partition(3, 0, 5_000);
        let a = run_partition(&p, &RandomSource::Seeded(42)).unwrap();
        let b = run_partition(&p, &RandomSource::Seeded(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_partition_index_selects_stream() {
        let mut a = RandomSource::Seeded(42).rng_for(&partition(0, 0, 1)).unwrap();
        let mut b = RandomSource::Seeded(42).rng_for(&partition(1, 0, 1)).unwrap();
        let xs: Vec<u64> = (0..4).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..4).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_entropy_source_produces_result() {
        let p = partition(0, 0, 1_000);
        let result = run_partition(&p, &RandomSource::Entropy).unwrap();
        assert_eq!(result.total_count(), 1_000);
    }

    #[test]
    fn test_seeded_estimate_is_plausible() {
        let p = partition(0, 0, 200_000);
        let result = run_partition(&p, &RandomSource::Seeded(2024)).unwrap();
        let estimate = 4.0 * result.in_count() as f64 / result.total_count() as f64;
        assert!((3.0..=3.3).contains(&estimate), "estimate {estimate}");
    }

    #[test]
    fn test_empty_partition_draws_nothing() {
        let p = partition(0, 10, 10);
        let result = run_partition(&p, &RandomSource::Seeded(1)).unwrap();
        assert_eq!(result, SampleResult::new(0, 0).unwrap());
    }

    #[test]
    fn test_random_source_serialization() {
        let json = serde_json::to_string(&RandomSource::Seeded(9)).unwrap();
        assert_eq!(json, r#"{"kind":"seeded","seed":9}"#);
        let json = serde_json::to_string(&RandomSource::Entropy).unwrap();
        assert_eq!(json, r#"{"kind":"entropy"}"#);
    }
}
