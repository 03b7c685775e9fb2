//! Core traits for gridweld

/// Receives step updates from long-running operations.
///
/// Operations call `on_progress(current, total)` after each unit of work. The
/// observer is passed in explicitly; there is no global work registry.
pub trait ProgressObserver {
    fn on_progress(&self, current: u64, total: u64);
}

/// Observer that ignores every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _current: u64, _total: u64) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(u64, u64),
{
    fn on_progress(&self, current: u64, total: u64) {
        self(current, total)
    }
}
