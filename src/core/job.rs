//! Job type and related aliases

use crate::core::slot::SlotWriter;

/// The fixed 3-tuple of raw input tokens a job function consumes.
pub type JobArgs = (String, String, String);

/// A boxed job function: pure mapping from three input tokens to one
/// formatted result string. Any domain-level failure (malformed input and
/// the like) is encoded into the returned string; there is no separate
/// error channel at this layer.
pub type JobFn = Box<dyn FnOnce(String, String, String) -> String + Send + 'static>;

/// A unit of work queued for the pool.
///
/// Owned exclusively by the job queue until a worker dequeues it; the worker
/// then takes the whole job apart, runs the function, and fulfills the slot.
pub struct Job {
    func: JobFn,
    args: JobArgs,
    slot: SlotWriter,
}

impl Job {
    /// Packages a job function, its arguments and the write half of its
    /// result slot.
    pub fn new(func: JobFn, args: JobArgs, slot: SlotWriter) -> Self {
        Self { func, args, slot }
    }

    /// Splits the job into its function/arguments pair and the slot to
    /// fulfill. Invocation is the worker's responsibility so that it happens
    /// with no queue lock held.
    pub fn into_parts(self) -> (JobFn, JobArgs, SlotWriter) {
        (self.func, self.args, self.slot)
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job").field("args", &self.args).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot;

    fn args() -> JobArgs {
        ("1".to_string(), "2".to_string(), "3".to_string())
    }

    #[test]
    fn test_job_runs_once_and_fulfills_slot() {
        let (writer, reader) = slot::slot();
        let job = Job::new(
            Box::new(|a, b, c| format!("{a}+{b}+{c}")),
            args(),
            writer,
        );

        let (func, (a, b, c), slot) = job.into_parts();
        slot.fulfill(func(a, b, c));

        assert_eq!(reader.wait(), "1+2+3");
    }

    #[test]
    fn test_job_debug_shows_args() {
        let (writer, _reader) = slot::slot();
        let job = Job::new(Box::new(|a, _, _| a), args(), writer);
        let rendered = format!("{job:?}");
        assert!(rendered.contains("\"1\""));
    }
}
