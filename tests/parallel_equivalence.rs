//! Seeded jobs produce the same result no matter how work is scheduled

use pi_sampler::job::{aggregate, partition_range, run_partition, RandomSource, WorkerPool};
use pi_sampler::storage::MemoryStore;
use pi_sampler::{JobConfig, Pipeline};
use std::sync::Arc;

#[tokio::test]
async fn test_pool_matches_sequential_sampling() {
    let plan = partition_range(120_000, 12).unwrap();
    let source = RandomSource::Seeded(31337);

    let sequential: Vec<_> = plan
        .iter()
        .map(|p| run_partition(p, &source).unwrap())
        .collect();
    let parallel = WorkerPool::new(5)
        .run(plan, move |p| run_partition(p, &source))
        .await
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(aggregate(&sequential).unwrap(), aggregate(&parallel).unwrap());
}

#[tokio::test]
async fn test_worker_count_does_not_change_estimate() {
    let mut estimates = Vec::new();
    for workers in [1, 2, 3, 8, 16] {
        let config = JobConfig::from_output_uri(60_000, 9, "memory://eq")
            .unwrap()
            .with_seed(Some(77))
            .with_workers(workers);
        let result = Pipeline::new(config, Arc::new(MemoryStore::new()))
            .unwrap()
            .estimate()
            .await
            .unwrap();
        estimates.push(result);
    }

    assert!(estimates.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_different_seeds_differ() {
    let partials = |seed| async move {
        WorkerPool::new(2)
            .run(partition_range(30_000, 3).unwrap(), move |p| {
                run_partition(p, &RandomSource::Seeded(seed))
            })
            .await
            .unwrap()
    };

    assert_ne!(partials(1).await, partials(2).await);
}
