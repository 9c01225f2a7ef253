//! Cooperative stop signal for the input listener.
//!
//! A [`StopSignal`]/[`StopTrigger`] pair connects the session to its listener
//! thread: the listener polls [`StopSignal::is_stopped`] between input polls,
//! and the session fires the trigger before joining. The condvar wakes any
//! in-progress [`wait_timeout`](StopSignal::wait_timeout) immediately, so
//! teardown latency is bounded by one input poll interval.

#![forbid(unsafe_code)]

use std::sync::{Arc, Condvar, Mutex};
use web_time::{Duration, Instant};

struct StopInner {
    stopped: Mutex<bool>,
    notify: Condvar,
}

/// Observer half: polled by the worker to detect a stop request.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<StopInner>,
}

/// Control half: fired by the owner to stop the worker.
///
/// Dropping the trigger does **not** stop the signal — call
/// [`stop`](Self::stop) explicitly.
pub struct StopTrigger {
    inner: Arc<StopInner>,
}

impl StopSignal {
    /// Create a connected signal/trigger pair.
    #[must_use]
    pub fn new() -> (Self, StopTrigger) {
        let inner = Arc::new(StopInner {
            stopped: Mutex::new(false),
            notify: Condvar::new(),
        });
        (
            Self {
                inner: Arc::clone(&inner),
            },
            StopTrigger { inner },
        )
    }

    /// Check whether a stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        *self
            .inner
            .stopped
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Block until either a stop is requested or the timeout elapses.
    ///
    /// Returns `true` if stopped, `false` if timed out.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let start = Instant::now();
        let mut stopped = self
            .inner
            .stopped
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        loop {
            if *stopped {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            let (guard, _) = self
                .inner
                .notify
                .wait_timeout(stopped, duration - elapsed)
                .unwrap_or_else(|e| e.into_inner());
            stopped = guard;
        }
    }
}

impl StopTrigger {
    /// Request a stop. All signal clones observe it; pending waits wake.
    pub fn stop(&self) {
        let mut stopped = self
            .inner
            .stopped
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        *stopped = true;
        self.inner.notify.notify_all();
    }
}
