//! Core types for the worker pool

pub mod error;
pub mod job;
pub mod slot;

pub use error::{PoolError, Result};
pub use job::{Job, JobArgs, JobFn};
pub use slot::{slot, SlotReader, SlotWriter};
