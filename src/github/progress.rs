//! Progress callbacks for long retrievals.
//!
//! Observers only see counts; they cannot influence what is fetched.

/// Receives progress updates after every fetched page.
pub trait ProgressObserver {
    /// Called with the number of unique runs fetched so far and the largest
    /// total GitHub has reported for the query.
    fn on_progress(&mut self, fetched: usize, total: u64);
}

impl<F> ProgressObserver for F
where
    F: FnMut(usize, u64),
{
    fn on_progress(&mut self, fetched: usize, total: u64) {
        self(fetched, total);
    }
}

/// Observer that ignores all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _fetched: usize, _total: u64) {}
}
