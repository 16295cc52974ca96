//! Closable FIFO queues.
//!
//! The pool runs on two of these: a queue of [`Job`]s feeding the workers and
//! a queue of [`SlotReader`]s feeding the consumer. Both need exactly the
//! same contract, so a single generic implementation backs both:
//!
//! - unbounded, strictly FIFO: pop order equals push order;
//! - [`pop_blocking`](FifoQueue::pop_blocking) parks the caller while empty
//!   and wakes on a new item or on [`close`](FifoQueue::close);
//! - after `close`, remaining items are still drained in order, and only
//!   then does `pop_blocking` report "no more" by returning `None`.
//!
//! The implementation rides on a `crossbeam-channel` unbounded channel.
//! Closing works by dropping the sender half: every receiver blocked in
//! `recv` wakes once the channel is drained, with no timeout or polling
//! involved.
//!
//! [`Job`]: crate::core::Job
//! [`SlotReader`]: crate::core::SlotReader

use crossbeam_channel::{Receiver, Sender};
use parking_lot::RwLock;

use crate::core::{Job, SlotReader};

/// Queue of pending jobs consumed by the workers.
pub type JobQueue = FifoQueue<Job>;

/// Queue of result slots, ordered by submission time, consumed by `collect`.
pub type ResultQueue = FifoQueue<SlotReader>;

/// Error returned when pushing onto a closed queue; hands the item back to
/// the caller so it is not silently dropped.
#[derive(Debug)]
pub struct QueueClosed<T>(pub T);

/// An unbounded FIFO queue that can be closed to release blocked poppers.
pub struct FifoQueue<T> {
    sender: RwLock<Option<Sender<T>>>,
    receiver: Receiver<T>,
}

impl<T> FifoQueue<T> {
    /// Creates an open, empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender: RwLock::new(Some(sender)),
            receiver,
        }
    }

    /// Appends an item at the tail. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns [`QueueClosed`] carrying the item if the queue has been closed.
    pub fn push(&self, item: T) -> std::result::Result<(), QueueClosed<T>> {
        match self.sender.read().as_ref() {
            Some(sender) => sender.send(item).map_err(|e| QueueClosed(e.0)),
            None => Err(QueueClosed(item)),
        }
    }

    /// Removes and returns the head, blocking while the queue is empty.
    ///
    /// Returns `None` only once the queue is closed *and* drained; items
    /// pushed before the close are always delivered first, in order.
    pub fn pop_blocking(&self) -> Option<T> {
        self.receiver.recv().ok()
    }

    /// Closes the queue: further pushes fail and every popper blocked on an
    /// empty queue wakes with `None`. Idempotent.
    pub fn close(&self) {
        // Dropping the sender is what wakes blocked receivers.
        self.sender.write().take();
    }

    /// Returns `true` if the queue has been closed.
    pub fn is_closed(&self) -> bool {
        self.sender.read().is_none()
    }

    /// Current number of queued items (approximate under concurrency).
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FifoQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FifoQueue")
            .field("len", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
