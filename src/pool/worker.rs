//! Worker thread implementation

use crate::core::{Job, PoolError, Result};
use crate::queue::JobQueue;
use log::{debug, error};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

/// Statistics for a worker thread
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total number of jobs processed
    pub jobs_processed: AtomicU64,
    /// Total number of jobs whose function panicked
    pub jobs_panicked: AtomicU64,
}

impl WorkerStats {
    /// Create new worker statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment jobs processed counter
    pub fn increment_processed(&self) {
        self.jobs_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment jobs panicked counter
    pub fn increment_panicked(&self) {
        self.jobs_panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total jobs processed
    pub fn get_jobs_processed(&self) -> u64 {
        self.jobs_processed.load(Ordering::Relaxed)
    }

    /// Get total jobs panicked
    pub fn get_jobs_panicked(&self) -> u64 {
        self.jobs_panicked.load(Ordering::Relaxed)
    }
}

/// A worker thread that drains jobs from the shared job queue and fulfills
/// each job's result slot.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Create and start a new worker.
    ///
    /// The thread is spawned immediately and begins waiting for jobs.
    ///
    /// # Shutdown Behavior
    ///
    /// The worker exits once the job queue is closed and empty, so every job
    /// enqueued before shutdown is still executed and its slot fulfilled.
    pub fn spawn(id: usize, name_prefix: &str, queue: Arc<JobQueue>) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let stats_clone = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(format!("{}-{}", name_prefix, id))
            .spawn(move || {
                Self::run(id, queue, stats_clone);
            })
            .map_err(|e| PoolError::spawn_with_source(id, e))?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Join the worker thread
    pub fn join(mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| PoolError::join(self.id, "Worker panicked"))?;
        }
        Ok(())
    }

    /// Main worker loop.
    ///
    /// `pop_blocking` hands back jobs in exact submission order and returns
    /// `None` once the queue is closed and drained, which is the stop signal.
    fn run(id: usize, queue: Arc<JobQueue>, stats: Arc<WorkerStats>) {
        debug!("worker {} started", id);

        while let Some(job) = queue.pop_blocking() {
            Self::execute_job(id, job, &stats);
        }

        debug!(
            "worker {} shutting down ({} jobs processed)",
            id,
            stats.get_jobs_processed()
        );
    }

    /// Execute a single job and fulfill its result slot.
    ///
    /// Runs entirely outside the queue's internals: the job was moved out of
    /// the queue by `pop_blocking`, so a slow job never blocks other workers
    /// from dequeuing.
    ///
    /// A panicking job function is caught and turned into an error string so
    /// the consumer blocked on this slot is never stranded.
    fn execute_job(id: usize, job: Job, stats: &WorkerStats) {
        let (func, (a, b, c), slot) = job.into_parts();

        let outcome = catch_unwind(AssertUnwindSafe(move || func(a, b, c)));

        match outcome {
            Ok(value) => {
                stats.increment_processed();
                slot.fulfill(value);
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("worker {}: job panicked: {}", id, panic_msg);
                stats.increment_panicked();
                slot.fulfill(format!("job panicked: {}", panic_msg));
            }
        }
    }
}
