//! Worker pool and worker threads

pub mod worker;
pub mod worker_pool;

pub use worker::{Worker, WorkerStats};
pub use worker_pool::{default_workers, PoolConfig, WorkerPool};
