use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Shared cancellation flag observed between replay steps.
///
/// Clones share the same flag, so a UI handle can cancel a replay the
/// driver owns. Once cancelled, a replay never resumes.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Waits out the delay between two replay steps.
///
/// The driver owns the timer and schedules the next step only after the
/// previous one has been applied, so a replay never runs ahead of its
/// UI-visible effects.
pub trait StepTimer {
    fn wait(&mut self, delay: Duration);
}

/// Blocks the driving thread between steps.
#[derive(Copy, Clone, Debug, Default)]
pub struct ThreadTimer;

impl StepTimer for ThreadTimer {
    fn wait(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
