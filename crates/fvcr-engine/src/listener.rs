#![forbid(unsafe_code)]

//! The input listener: a dedicated worker feeding the command queue.
//!
//! The listener owns the backend's [`InputSource`] half, polls it with a
//! bounded timeout, translates raw events through
//! [`translate`](fvcr_core::command::translate), and sends the resulting
//! commands into the session's bounded queue. Unrecognized input is dropped
//! here; command ordering matches input ordering.
//!
//! The worker checks its stop signal between polls, so the session can stop
//! and join it deterministically on teardown instead of abandoning a
//! permanent background reader. A full queue blocks the listener, not the
//! session; that backpressure is acceptable because human input rates sit far
//! below the queue capacity.

use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};

use fvcr_backend::InputSource;
use fvcr_core::command::{ReplayCommand, translate};

use crate::stop::{StopSignal, StopTrigger};

/// How long one input poll may block before the stop signal is rechecked.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Handle to a running listener thread.
///
/// [`stop`](Self::stop) fires the stop signal and joins the worker. Dropping
/// the handle fires the signal without joining (drop must not block); prefer
/// the explicit stop on session teardown.
pub struct InputListener {
    trigger: StopTrigger,
    thread: Option<JoinHandle<()>>,
}

impl InputListener {
    /// Spawn a listener that feeds `commands` from `input`.
    pub fn spawn<I>(input: I, commands: SyncSender<ReplayCommand>) -> Self
    where
        I: InputSource + Send + 'static,
    {
        let (signal, trigger) = StopSignal::new();
        let thread = thread::spawn(move || run(input, commands, signal));
        Self {
            trigger,
            thread: Some(thread),
        }
    }

    /// Stop the worker and join it.
    pub fn stop(mut self) {
        self.trigger.stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for InputListener {
    fn drop(&mut self) {
        self.trigger.stop();
    }
}

fn run<I: InputSource>(mut input: I, commands: SyncSender<ReplayCommand>, stop: StopSignal) {
    debug!("input listener started");
    while !stop.is_stopped() {
        match input.poll_input(POLL_INTERVAL) {
            Ok(false) => {}
            Ok(true) => match input.read_input() {
                Ok(Some(event)) => {
                    if let Some(command) = translate(&event) {
                        trace!(?command, "input translated");
                        if commands.send(command).is_err() {
                            // Receiver gone: the session already ended.
                            break;
                        }
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    debug!(%error, "input read failed, listener exiting");
                    break;
                }
            },
            Err(error) => {
                debug!(%error, "input poll failed, listener exiting");
                break;
            }
        }
    }
    debug!("input listener stopped");
}
