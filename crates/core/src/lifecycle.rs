//! Scoped resource helpers for timers and listener registrations
//!
//! Both helpers release their resource on drop, so a widget that is torn down
//! by any path (explicit unmount, early return, panic unwinding) never leaks a
//! pending timer or an ambient listener.

use tokio::task::AbortHandle;

/// Holder for at most one pending timer task
///
/// Storing a new handle cancels the previous one first.
#[derive(Debug, Default)]
pub struct TimerSlot {
    handle: Option<AbortHandle>,
}

impl TimerSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the stored timer (if any) and store `handle` in its place
    ///
    /// Returns true if a still-running timer was cancelled.
    pub fn replace(&mut self, handle: AbortHandle) -> bool {
        let cancelled = self.cancel();
        self.handle = Some(handle);
        cancelled
    }

    /// Cancel the stored timer
    ///
    /// No-op when the slot is empty or the timer already ran. Returns true if a
    /// still-running timer was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let live = !handle.is_finished();
                handle.abort();
                live
            }
            None => false,
        }
    }

    /// Forget the stored handle without aborting it
    ///
    /// Used by a timer that is finishing on its own.
    pub fn disarm(&mut self) {
        self.handle = None;
    }

    /// Whether a timer is stored and has not finished yet
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs a release action exactly once: on `release()` or on drop
pub struct ReleaseGuard<F: FnOnce()> {
    release: Option<F>,
}

impl<F: FnOnce()> ReleaseGuard<F> {
    /// Wrap a release action
    pub fn new(release: F) -> Self {
        Self {
            release: Some(release),
        }
    }

    /// Run the release action now
    ///
    /// Returns false if it already ran.
    pub fn release(&mut self) -> bool {
        match self.release.take() {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    /// Whether the release action has already run
    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }
}

impl<F: FnOnce()> Drop for ReleaseGuard<F> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<F: FnOnce()> std::fmt::Debug for ReleaseGuard<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseGuard")
            .field("released", &self.is_released())
            .finish()
    }
}
