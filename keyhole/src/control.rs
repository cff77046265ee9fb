//! Pause/resume/stop signalling between a controller and the search worker.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Shared switchboard steering one search worker.
///
/// The controlling thread calls the `request_*` methods; the worker calls
/// [`SearchControl::wait_if_paused`] and [`SearchControl::is_stop_requested`]
/// between oracle submissions. Pause and stop are independent latches:
/// [`SearchControl::request_stop`] always clears the pause so a paused worker
/// wakes up to observe the stop instead of hanging.
///
/// Safe for one concurrent writer and one concurrent reader without external
/// locking. Created fresh per search and discarded with it.
#[derive(Debug, Default)]
pub struct SearchControl {
    paused: Mutex<bool>,
    resumed: Condvar,
    stop_requested: AtomicBool,
}

impl SearchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the worker to pause at its next check. Idempotent.
    pub fn request_pause(&self) {
        *self.lock_paused() = true;
    }

    /// Wake a paused worker. Idempotent, safe when not paused.
    pub fn request_resume(&self) {
        *self.lock_paused() = false;
        self.resumed.notify_all();
    }

    /// Ask the worker to stop at its next check. Also clears the pause, so a
    /// worker blocked in [`SearchControl::wait_if_paused`] unblocks and can
    /// observe the stop.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
        *self.lock_paused() = false;
        self.resumed.notify_all();
    }

    /// Block the calling worker until the pause is cleared. Returns
    /// immediately when not paused. This is the worker's only indefinite
    /// suspension point.
    pub fn wait_if_paused(&self) {
        let mut paused = self.lock_paused();
        while *paused {
            paused = self
                .resumed
                .wait(paused)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Whether a stop has been requested. Non-blocking.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    fn lock_paused(&self) -> MutexGuard<'_, bool> {
        // The lock only ever guards a bool flip; a poisoned value is still valid.
        self.paused.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
