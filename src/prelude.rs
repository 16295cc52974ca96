//! Convenient re-exports for common types

pub use crate::core::{Job, JobArgs, JobFn, PoolError, Result};
pub use crate::pool::{PoolConfig, WorkerPool, WorkerStats};
