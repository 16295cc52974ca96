//! Worker pool implementation

use crate::core::{slot, Job, JobArgs, PoolError, Result, SlotReader};
use crate::pool::worker::{Worker, WorkerStats};
use crate::queue::{JobQueue, QueueClosed, ResultQueue};
use log::{debug, error};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Configuration for a worker pool
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads (0 = hardware parallelism minus one)
    pub num_workers: usize,
    /// Thread name prefix
    pub thread_name_prefix: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            // One less than the host parallelism leaves headroom for the
            // producer and consumer threads.
            num_workers: default_workers(),
            thread_name_prefix: "worker".to_string(),
        }
    }
}

/// Default worker count: hardware parallelism minus one, floor 1.
pub fn default_workers() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

impl PoolConfig {
    /// Create a new configuration with the specified number of workers
    #[must_use]
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers: if num_workers == 0 {
                default_workers()
            } else {
                num_workers
            },
            ..Default::default()
        }
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_workers == 0 {
            return Err(PoolError::invalid_config(
                "num_workers",
                "Number of workers must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// A pool of worker threads that returns results in submission order.
///
/// Jobs are handed to whichever worker frees up first, but the consumer
/// always observes results in the order [`submit`](WorkerPool::submit) was
/// called. The trick is that `submit` parks a one-shot result slot in a FIFO
/// result queue *before* the job is even enqueued: the Nth
/// [`collect`](WorkerPool::collect) call pops the Nth slot and waits on it,
/// no matter which job finishes computing first.
///
/// # Usage
///
/// ```rust
/// use quadpool::prelude::*;
///
/// # fn main() -> Result<()> {
/// let pool = WorkerPool::with_workers(4)?;
///
/// pool.submit(
///     Box::new(|a, b, c| format!("{a} {b} {c}")),
///     ("1".into(), "2".into(), "3".into()),
/// )?;
///
/// assert_eq!(pool.collect(), Some("1 2 3".to_string()));
///
/// pool.shutdown()?;
/// assert_eq!(pool.collect(), None);
/// # Ok(())
/// # }
/// ```
pub struct WorkerPool {
    config: PoolConfig,
    jobs: Arc<JobQueue>,
    results: ResultQueue,
    workers: Mutex<Vec<Worker>>,
    running: AtomicBool,
    jobs_submitted: AtomicU64,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("config", &self.config)
            .field("running", &self.running.load(Ordering::Relaxed))
            .field(
                "jobs_submitted",
                &self.jobs_submitted.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl WorkerPool {
    /// Create a worker pool with the default configuration.
    ///
    /// All workers are spawned immediately; there is no separate start step.
    pub fn new() -> Result<Self> {
        Self::with_config(PoolConfig::default())
    }

    /// Create a worker pool with the specified number of workers
    pub fn with_workers(num_workers: usize) -> Result<Self> {
        Self::with_config(PoolConfig::new(num_workers))
    }

    /// Create a worker pool with a custom configuration.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration or if any worker thread cannot be
    /// spawned. Spawn failure aborts construction: already-started workers
    /// are stopped and joined, and no partially working pool is returned.
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        config.validate()?;

        let jobs = Arc::new(JobQueue::new());
        let results = ResultQueue::new();

        let mut workers = Vec::with_capacity(config.num_workers);
        for id in 0..config.num_workers {
            match Worker::spawn(id, &config.thread_name_prefix, Arc::clone(&jobs)) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    jobs.close();
                    for worker in workers {
                        if let Err(join_err) = worker.join() {
                            error!("worker cleanup after failed spawn: {}", join_err);
                        }
                    }
                    return Err(e);
                }
            }
        }

        debug!(
            "worker pool '{}' started with {} workers",
            config.thread_name_prefix, config.num_workers
        );

        Ok(Self {
            config,
            jobs,
            results,
            workers: Mutex::new(workers),
            running: AtomicBool::new(true),
            jobs_submitted: AtomicU64::new(0),
        })
    }

    /// Submit a job to the pool. Never blocks and never waits for the
    /// computation.
    ///
    /// The result slot is pushed onto the result queue *before* the job is
    /// enqueued, which fixes the result's position in submission order.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Stopped`] if the pool has been shut down.
    pub fn submit(&self, func: crate::core::JobFn, args: JobArgs) -> Result<()> {
        if !self.running.load(Ordering::Acquire) {
            return Err(PoolError::stopped(&self.config.thread_name_prefix));
        }

        let (writer, reader) = slot();

        self.results
            .push(reader)
            .map_err(|_| PoolError::stopped(&self.config.thread_name_prefix))?;

        if let Err(QueueClosed(job)) = self.jobs.push(Job::new(func, args, writer)) {
            // Shutdown raced the submit between the two pushes. The reader is
            // already enqueued and may still be drained by the consumer, so
            // fulfill its slot rather than leave a waiter stranded.
            let (_func, _args, slot) = job.into_parts();
            slot.fulfill("job rejected: pool stopped".to_string());
            return Err(PoolError::stopped(&self.config.thread_name_prefix));
        }

        self.jobs_submitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Collect the result of the oldest uncollected submission.
    ///
    /// Blocks while the result queue is empty, then blocks again until that
    /// submission's job has run. Returns `None` once the pool is shut down
    /// and every outstanding result has been collected.
    pub fn collect(&self) -> Option<String> {
        self.results.pop_blocking().map(SlotReader::wait)
    }

    /// Number of worker threads
    pub fn num_workers(&self) -> usize {
        self.config.num_workers
    }

    /// Check if the pool is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Total number of jobs submitted
    pub fn jobs_submitted(&self) -> u64 {
        self.jobs_submitted.load(Ordering::Relaxed)
    }

    /// Number of results not yet popped by `collect` (approximate)
    pub fn pending_results(&self) -> usize {
        self.results.len()
    }

    /// Get statistics for all workers
    pub fn worker_stats(&self) -> Vec<Arc<WorkerStats>> {
        self.workers.lock().iter().map(|w| w.stats()).collect()
    }

    /// Total jobs processed across all workers
    pub fn total_jobs_processed(&self) -> u64 {
        let workers = self.workers.lock();
        workers.iter().map(|w| w.stats().get_jobs_processed()).sum()
    }

    /// Shut down the pool and wait for all workers to finish.
    ///
    /// 1. Stops accepting new submissions.
    /// 2. Closes the job queue: workers drain the jobs already queued, then
    ///    exit.
    /// 3. Closes the result queue: a consumer blocked on an empty queue
    ///    wakes and observes "no more results"; slots still queued remain
    ///    collectable and are fulfilled by the draining workers.
    /// 4. Joins every worker thread.
    ///
    /// Safe to call more than once; later calls return immediately.
    pub fn shutdown(&self) -> Result<()> {
        if self
            .running
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }

        debug!(
            "worker pool '{}' shutting down",
            self.config.thread_name_prefix
        );

        self.jobs.close();
        self.results.close();

        let workers = std::mem::take(&mut *self.workers.lock());
        for worker in workers {
            worker.join()?;
        }

        Ok(())
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if self.running.load(Ordering::Acquire) {
            if let Err(e) = self.shutdown() {
                error!(
                    "failed to shut down worker pool '{}' during drop: {}",
                    self.config.thread_name_prefix, e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn tokens(a: &str, b: &str, c: &str) -> JobArgs {
        (a.to_string(), b.to_string(), c.to_string())
    }

    #[test]
    fn test_pool_creation() {
        let pool = WorkerPool::new().expect("create pool");
        assert!(pool.is_running());
        assert_eq!(pool.num_workers(), default_workers());

        pool.shutdown().expect("shutdown pool");
        assert!(!pool.is_running());
    }

    #[test]
    fn test_pool_with_workers() {
        let pool = WorkerPool::with_workers(4).expect("create pool");
        assert_eq!(pool.num_workers(), 4);
        pool.shutdown().expect("shutdown pool");
    }

    #[test]
    fn test_config_zero_workers_uses_default() {
        let config = PoolConfig::new(0);
        assert_eq!(config.num_workers, default_workers());
    }

    #[test]
    fn test_submit_and_collect_single() {
        let pool = WorkerPool::with_workers(2).expect("create pool");

        pool.submit(
            Box::new(|a, b, c| format!("{a}:{b}:{c}")),
            tokens("x", "y", "z"),
        )
        .expect("submit job");

        assert_eq!(pool.collect(), Some("x:y:z".to_string()));
        assert_eq!(pool.jobs_submitted(), 1);

        pool.shutdown().expect("shutdown pool");
    }

    #[test]
    fn test_results_arrive_in_submission_order() {
        let pool = WorkerPool::with_workers(4).expect("create pool");
        let n = 8u64;

        // Earlier submissions sleep longer, so completion order is roughly
        // the reverse of submission order.
        for i in 0..n {
            pool.submit(
                Box::new(move |_, _, _| {
                    thread::sleep(Duration::from_millis(10 * (n - i)));
                    i.to_string()
                }),
                tokens("", "", ""),
            )
            .expect("submit job");
        }

        for i in 0..n {
            assert_eq!(pool.collect(), Some(i.to_string()));
        }

        pool.shutdown().expect("shutdown pool");
    }

    #[test]
    fn test_collect_after_shutdown_drains_then_signals_end() {
        let pool = WorkerPool::with_workers(2).expect("create pool");

        for i in 0..5 {
            pool.submit(Box::new(move |_, _, _| i.to_string()), tokens("", "", ""))
                .expect("submit job");
        }

        pool.shutdown().expect("shutdown pool");

        // Results queued before shutdown are still collectable, in order.
        for i in 0..5 {
            assert_eq!(pool.collect(), Some(i.to_string()));
        }
        assert_eq!(pool.collect(), None);
    }

    #[test]
    fn test_submit_after_shutdown_fails() {
        let pool = WorkerPool::with_workers(2).expect("create pool");
        pool.shutdown().expect("shutdown pool");

        let result = pool.submit(Box::new(|_, _, _| String::new()), tokens("", "", ""));
        assert!(matches!(result, Err(PoolError::Stopped { .. })));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let pool = WorkerPool::with_workers(2).expect("create pool");
        pool.shutdown().expect("first shutdown");
        pool.shutdown().expect("second shutdown");
        assert!(!pool.is_running());
    }

    #[test]
    fn test_shutdown_without_jobs_does_not_hang() {
        // High worker count, zero jobs: every worker exits from its first wait.
        for _ in 0..20 {
            let pool = WorkerPool::with_workers(16).expect("create pool");
            pool.shutdown().expect("shutdown pool");
        }
    }

    #[test]
    fn test_shutdown_releases_blocked_consumer() {
        let pool = Arc::new(WorkerPool::with_workers(2).expect("create pool"));

        let consumer = {
            let pool = Arc::clone(&pool);
            thread::spawn(move || pool.collect())
        };

        // Give the consumer time to block on the empty result queue.
        thread::sleep(Duration::from_millis(50));
        pool.shutdown().expect("shutdown pool");

        assert_eq!(consumer.join().expect("consumer panicked"), None);
    }

    #[test]
    fn test_results_collected_equals_jobs_submitted() {
        let pool = WorkerPool::with_workers(4).expect("create pool");
        let n = 500;

        for i in 0..n {
            pool.submit(Box::new(move |_, _, _| i.to_string()), tokens("", "", ""))
                .expect("submit job");
        }

        let mut collected = 0;
        for _ in 0..n {
            assert!(pool.collect().is_some());
            collected += 1;
        }

        assert_eq!(collected, n);
        assert_eq!(pool.jobs_submitted(), n as u64);
        pool.shutdown().expect("shutdown pool");
        assert_eq!(pool.total_jobs_processed(), n as u64);
        assert_eq!(pool.collect(), None);
    }

    #[test]
    fn test_drop_shuts_down_pool() {
        let pool = WorkerPool::with_workers(2).expect("create pool");
        pool.submit(Box::new(|_, _, _| "done".to_string()), tokens("", "", ""))
            .expect("submit job");
        drop(pool);
    }
}
