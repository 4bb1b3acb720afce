//! Single-value debounce controller

use parking_lot::Mutex;
use quiesce_core::{DebounceConfig, TimerSlot};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

type Sink<T> = Box<dyn FnMut(T) + Send>;

struct Inner<T> {
    /// Most recent observed value not yet delivered
    pending: Option<T>,
    /// When `pending` settles
    deadline: Option<Instant>,
    /// Bumped on every schedule or cancel; a timer only delivers if it matches
    generation: u64,
    /// The one live timer
    timer: TimerSlot,
    /// Set by `cancel()`, never cleared
    closed: bool,
}

impl<T> Inner<T> {
    /// Invalidate whatever is scheduled and hand back the pending value
    fn take_pending(&mut self) -> Option<T> {
        self.generation += 1;
        self.deadline = None;
        self.timer.cancel();
        self.pending.take()
    }
}

/// Turns a burst of observed values into one settled value
///
/// Every `observe` cancels the pending emission and schedules a new one
/// `window` from now. When a window passes with no new observation, the last
/// value is handed to the sink exactly once. Equal values are not filtered.
///
/// Timers run as tokio tasks, so `observe` must be called from inside a
/// runtime. Nothing is delivered once `cancel()` has returned.
pub struct Debouncer<T: Send + 'static> {
    window: Duration,
    inner: Arc<Mutex<Inner<T>>>,
    sink: Arc<Mutex<Sink<T>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a controller delivering settled values to `sink`
    ///
    /// The sink must not call `flush()` or `cancel()` on this controller.
    pub fn new(window: Duration, sink: impl FnMut(T) + Send + 'static) -> Self {
        Self {
            window,
            inner: Arc::new(Mutex::new(Inner {
                pending: None,
                deadline: None,
                generation: 0,
                timer: TimerSlot::new(),
                closed: false,
            })),
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    /// Create a controller using the configured window
    pub fn from_config(config: &DebounceConfig, sink: impl FnMut(T) + Send + 'static) -> Self {
        Self::new(config.window(), sink)
    }

    /// Quiescence window
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a new value and restart the window
    ///
    /// If the previous value's window has already run out but its timer has
    /// not been polled yet, that value is delivered first. No-op after
    /// `cancel()`.
    pub fn observe(&self, value: T) {
        let now = Instant::now();

        let overdue = {
            let mut inner = self.inner.lock();
            if inner.closed {
                debug!("Ignoring observe on cancelled debouncer");
                return;
            }
            match inner.deadline {
                Some(deadline) if deadline <= now => inner.take_pending(),
                _ => None,
            }
        };
        if let Some(value) = overdue {
            trace!("Delivering overdue value before rescheduling");
            self.deliver_checked(value);
        }

        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }

        inner.generation += 1;
        let generation = inner.generation;
        let deadline = now + self.window;
        inner.pending = Some(value);
        inner.deadline = Some(deadline);

        let timer_inner = Arc::clone(&self.inner);
        let timer_sink = Arc::clone(&self.sink);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            fire(&timer_inner, &timer_sink, generation);
        })
        .abort_handle();

        if inner.timer.replace(handle) {
            trace!("Superseded pending emission");
        }
    }

    /// Deliver the pending value now instead of waiting out the window
    ///
    /// Returns true if a value was delivered.
    pub fn flush(&self) -> bool {
        let mut sink = self.sink.lock();
        let value = {
            let mut inner = self.inner.lock();
            if inner.closed {
                return false;
            }
            inner.take_pending()
        };
        match value {
            Some(value) => {
                (*sink)(value);
                true
            }
            None => false,
        }
    }

    /// Cancel any pending emission and close the controller
    ///
    /// Idempotent. Later `observe` calls are ignored. Waits for a delivery
    /// already in progress, so the sink is never called after this returns.
    pub fn cancel(&self) {
        // Sink first, then state: same order as `fire`
        let _sink = self.sink.lock();
        let mut inner = self.inner.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;
        if inner.take_pending().is_some() {
            debug!("Cancelled debouncer with a pending emission");
        }
    }

    /// Whether an emission is scheduled
    pub fn is_pending(&self) -> bool {
        self.inner.lock().pending.is_some()
    }

    /// Whether `cancel()` has been called
    pub fn is_cancelled(&self) -> bool {
        self.inner.lock().closed
    }

    fn deliver_checked(&self, value: T) {
        let mut sink = self.sink.lock();
        if self.inner.lock().closed {
            return;
        }
        (*sink)(value);
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T: Send + 'static> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .field("pending", &inner.pending.is_some())
            .field("closed", &inner.closed)
            .finish()
    }
}

/// Timer body: deliver if still current
fn fire<T>(inner: &Mutex<Inner<T>>, sink: &Mutex<Sink<T>>, generation: u64) {
    // Sink first, then state: same order as `flush`
    let mut sink = sink.lock();
    let value = {
        let mut inner = inner.lock();
        if inner.closed || inner.generation != generation {
            trace!("Stale debounce timer woke up, dropping");
            return;
        }
        inner.deadline = None;
        inner.timer.disarm();
        inner.pending.take()
    };
    if let Some(value) = value {
        (*sink)(value);
    }
}
