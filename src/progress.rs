// src/progress.rs
/// Lightweight progress reporting for the long-running harvest loop.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of states to process.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One state harvested successfully.
    fn item_done(&mut self, _state: &str, _records: usize) {}

    /// One state exhausted every source.
    fn item_failed(&mut self, _state: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
