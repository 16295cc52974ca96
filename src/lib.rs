//! # quadpool
//!
//! A worker pool that runs fixed-arity jobs on a set of persistent threads
//! and hands their results back to a single consumer in exact submission
//! order, no matter which worker finishes first.
//!
//! ## Features
//!
//! - **Ordered collection**: results come back in submission order, never
//!   completion order
//! - **Result Slots**: one-shot handoff cells fixed in a FIFO result queue
//!   at submission time
//! - **Graceful shutdown**: queued jobs are drained, blocked waiters are
//!   released, worker threads are joined
//! - **Thread safety**: built on crossbeam channels and parking_lot
//! - **Quadratic solver**: the bundled job function behind the `quadpool`
//!   binary
//!
//! ## Quick Start
//!
//! ```rust
//! use quadpool::prelude::*;
//! use quadpool::solver::calculate_roots;
//!
//! # fn main() -> Result<()> {
//! let pool = WorkerPool::with_workers(4)?;
//!
//! // Submit equations; slow jobs do not delay earlier results.
//! pool.submit(
//!     Box::new(calculate_roots),
//!     ("1".into(), "-3".into(), "2".into()),
//! )?;
//! pool.submit(
//!     Box::new(calculate_roots),
//!     ("0".into(), "2".into(), "-4".into()),
//! )?;
//!
//! // Results arrive in submission order.
//! assert_eq!(pool.collect().as_deref(), Some("(1 -3 2) => (1 2) Xmin=1.5"));
//! assert_eq!(pool.collect().as_deref(), Some("(0 2 -4) => (2)"));
//!
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## How ordering works
//!
//! `submit` pushes a one-shot [`SlotReader`](core::SlotReader) onto a FIFO
//! result queue *before* the job reaches the job queue, pinning the result's
//! position at submission time. `collect` pops the oldest slot and blocks on
//! it, so the Nth collect always waits for the Nth submission even when a
//! later job computes first.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pool;
pub mod prelude;
pub mod queue;
pub mod solver;

pub use crate::core::{Job, JobArgs, JobFn, PoolError, Result, SlotReader, SlotWriter};
pub use crate::pool::{PoolConfig, WorkerPool, WorkerStats};
