//! One-shot result slots.
//!
//! A slot is the handoff cell between the worker that computes a job's result
//! and the consumer that collects it. The producer creates a slot at
//! submission time and parks its read half in the result queue, which is what
//! fixes the submission-order position of the result long before any worker
//! has touched the job.
//!
//! The write half is consumed by [`SlotWriter::fulfill`], so a second write
//! is unrepresentable. The read half blocks in [`SlotReader::wait`] until the
//! value arrives; there is no timeout, matching the pool-wide rule that the
//! only way to unblock is for the job to run to completion.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

/// Shared state between the writer and reader halves of one slot.
struct SlotShared {
    value: Mutex<Option<String>>,
    ready: Condvar,
}

/// Write half of a result slot, held by the job until a worker fulfills it.
pub struct SlotWriter {
    shared: Arc<SlotShared>,
}

/// Read half of a result slot, queued in submission order for the consumer.
pub struct SlotReader {
    shared: Arc<SlotShared>,
}

/// Creates a connected writer/reader pair for a single result.
pub fn slot() -> (SlotWriter, SlotReader) {
    let shared = Arc::new(SlotShared {
        value: Mutex::new(None),
        ready: Condvar::new(),
    });
    (
        SlotWriter {
            shared: Arc::clone(&shared),
        },
        SlotReader { shared },
    )
}

impl SlotWriter {
    /// Stores the computed value and wakes the waiting reader.
    ///
    /// Consumes the writer: the single-write invariant is enforced by the
    /// type system rather than at runtime.
    pub fn fulfill(self, value: String) {
        let mut guard = self.shared.value.lock();
        debug_assert!(guard.is_none(), "result slot fulfilled twice");
        *guard = Some(value);
        // Single consumer, so notify_one suffices.
        self.shared.ready.notify_one();
    }
}

impl SlotReader {
    /// Blocks until the paired writer fulfills the slot, then returns the value.
    pub fn wait(self) -> String {
        let mut guard = self.shared.value.lock();
        loop {
            if let Some(value) = guard.take() {
                return value;
            }
            self.shared.ready.wait(&mut guard);
        }
    }

    /// Returns `true` if the value has already been written.
    pub fn is_ready(&self) -> bool {
        self.shared.value.lock().is_some()
    }
}

impl std::fmt::Debug for SlotWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotWriter").finish_non_exhaustive()
    }
}

impl std::fmt::Debug for SlotReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotReader")
            .field("ready", &self.is_ready())
            .finish()
    }
}
