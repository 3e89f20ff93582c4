//! Fixed-size worker pool for the map phase
//!
//! Partitions are pushed onto a bounded work queue up front; `workers` async
//! agents drain it, running each partition's CPU-bound task on the blocking
//! thread pool and reporting back over a result channel. `run` only returns
//! after every agent has been joined.

use super::partition::Partition;
use crate::error::{JobError, JobResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// Partitions tagged with their position in the submitted plan
type WorkQueue = Arc<Mutex<mpsc::Receiver<(usize, Partition)>>>;
type Report<T> = (usize, JobResult<T>);

/// Pool of map workers
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: usize,
    task_timeout: Option<Duration>,
}

impl WorkerPool {
    /// Create a pool with `workers` agents; zero is treated as one
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            task_timeout: None,
        }
    }

    /// Fail the job when a single partition runs longer than `timeout`
    pub fn with_task_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.task_timeout = timeout;
        self
    }

    /// Number of agents this pool spawns at most
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `task` over every partition and return the outputs in the order
    /// the partitions were given
    ///
    /// Ordering uses each partition's position in `partitions`, so any
    /// sub-plan or hand-built plan is accepted whatever its `index` values.
    ///
    /// The first failure reported by any task fails the whole run. Agents stop
    /// taking new partitions once a failure is recorded, but tasks already in
    /// flight are still awaited before returning.
    pub async fn run<T, F>(&self, partitions: Vec<Partition>, task: F) -> JobResult<Vec<T>>
    where
        T: Send + 'static,
        F: Fn(&Partition) -> JobResult<T> + Send + Sync + 'static,
    {
        let total = partitions.len();
        if total == 0 {
            warn!("No partitions to process in map phase");
            return Ok(Vec::new());
        }

        let agents = self.workers.min(total);
        info!(
            "Distributing {} partitions across {} workers",
            total, agents
        );
        let started = Instant::now();

        // Queue every partition, then close the sender so agents see the end
        let (work_tx, work_rx) = mpsc::channel::<(usize, Partition)>(total);
        for (position, partition) in partitions.into_iter().enumerate() {
            work_tx
                .send((position, partition))
                .await
                .map_err(|e| JobError::configuration(format!("Work queue closed: {}", e)))?;
        }
        drop(work_tx);
        let work_rx: WorkQueue = Arc::new(Mutex::new(work_rx));

        let (result_tx, mut result_rx) = mpsc::channel::<Report<T>>(total);
        let failed = Arc::new(AtomicBool::new(false));
        let task = Arc::new(task);

        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(agents);
        for agent_index in 0..agents {
            let agent = Agent {
                index: agent_index,
                work_rx: work_rx.clone(),
                result_tx: result_tx.clone(),
                failed: failed.clone(),
                task: task.clone(),
                task_timeout: self.task_timeout,
            };
            handles.push(tokio::spawn(agent.run()));
        }
        drop(result_tx);

        // Join barrier
        let mut panicked = None;
        for handle in handles {
            if let Err(join_err) = handle.await {
                warn!("Worker task ended abnormally: {}", join_err);
                panicked.get_or_insert_with(|| join_err.to_string());
            }
        }

        let mut outputs: Vec<Option<T>> = (0..total).map(|_| None).collect();
        let mut first_error = None;
        while let Some((position, outcome)) = result_rx.recv().await {
            match outcome {
                Ok(value) => outputs[position] = Some(value),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        if let Some(message) = panicked {
            return Err(JobError::WorkerPanicked { message });
        }

        let outputs: Vec<T> = outputs.into_iter().flatten().collect();
        if outputs.len() != total {
            return Err(JobError::WorkerPanicked {
                message: format!("{} of {} partitions reported", outputs.len(), total),
            });
        }

        info!(
            "Map phase completed: {} partitions in {:.2?}",
            total,
            started.elapsed()
        );
        Ok(outputs)
    }
}

/// One map worker draining the shared queue
struct Agent<T, F> {
    index: usize,
    work_rx: WorkQueue,
    result_tx: mpsc::Sender<Report<T>>,
    failed: Arc<AtomicBool>,
    task: Arc<F>,
    task_timeout: Option<Duration>,
}

impl<T, F> Agent<T, F>
where
    T: Send + 'static,
    F: Fn(&Partition) -> JobResult<T> + Send + Sync + 'static,
{
    async fn run(self) {
        trace!("Worker {} started", self.index);
        let mut processed = 0usize;

        loop {
            if self.failed.load(Ordering::Acquire) {
                debug!("Worker {} stopping after a failed partition", self.index);
                break;
            }

            let next = { self.work_rx.lock().await.recv().await };
            let Some((position, partition)) = next else {
                break;
            };

            let outcome = self.execute(partition).await;
            if outcome.is_err() {
                self.failed.store(true, Ordering::Release);
            }
            processed += 1;

            if self.result_tx.send((position, outcome)).await.is_err() {
                break;
            }
        }

        trace!("Worker {} finished after {} partitions", self.index, processed);
    }

    async fn execute(&self, partition: Partition) -> JobResult<T> {
        debug!(
            "Worker {} sampling partition {} [{}, {})",
            self.index, partition.index, partition.start, partition.end
        );

        let task = self.task.clone();
        let handle = tokio::task::spawn_blocking(move || task(&partition));

        let joined = match self.task_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    return Err(JobError::Timeout {
                        partition: partition.index,
                        timeout,
                    })
                }
            },
            None => handle.await,
        };

        joined.map_err(|e| JobError::WorkerPanicked {
            message: format!("partition {}: {}", partition.index, e),
        })?
    }
}
