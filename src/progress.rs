// src/progress.rs
/// Lightweight progress reporting for a crawl.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once the link list is known, with the number of lots to visit.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One lot produced a record. `index` is 1-based.
    fn item_done(&mut self, _index: usize, _url: &str) {}

    /// One lot was skipped after an error.
    fn item_failed(&mut self, _index: usize, _url: &str, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
