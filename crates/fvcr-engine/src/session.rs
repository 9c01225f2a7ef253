#![forbid(unsafe_code)]

//! The replay session: the single-threaded controller loop.
//!
//! A [`ReplaySession`] owns the frame log, the playback state, the undo
//! stack, the shadow screen, and the display sink. [`run`](ReplaySession::run)
//! spawns the input listener and then races the auto-advance delay against
//! the command queue with `recv_timeout`: a timeout synthesizes a forward
//! step, a real command wins the race and implicitly discards the pending
//! timeout. Because no timer object outlives the loop iteration that
//! computed it, a stale timer can never fire against a newer state.
//!
//! Commands can also be fed directly through
//! [`apply_command`](ReplaySession::apply_command), the stepping surface the
//! integration tests and embedders without an input thread use.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};

use tracing::{debug, info, trace};

use fvcr_backend::{DisplaySink, InputSource};
use fvcr_core::command::ReplayCommand;
use fvcr_core::frame::FrameLog;

use crate::listener::InputListener;
use crate::playback::{Action, PlaybackState, Speed, transition};
use crate::screen::ScreenBuffer;
use crate::timing::advance_delay;
use crate::undo::{UndoEntry, UndoStack};

/// Session tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Start in auto-advance mode.
    pub auto: bool,
    /// Initial speed factor.
    pub speed: Speed,
    /// Bound of the command queue. A tuning knob, not a correctness
    /// requirement: producers block (backpressure) when it fills.
    pub queue_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto: true,
            speed: Speed::NORMAL,
            queue_capacity: 100,
        }
    }
}

impl SessionConfig {
    /// Start paused instead of playing.
    #[must_use]
    pub fn paused(mut self) -> Self {
        self.auto = false;
        self
    }

    /// Set the initial speed.
    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    /// Set the command queue bound.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}

/// Fatal session failures.
///
/// The state machine itself is total; the only failure sources are the
/// display sink (fatal once the session is running, per the session
/// contract) and the command channel closing without a quit.
#[derive(Debug, thiserror::Error)]
pub enum SessionError<E: core::fmt::Debug + core::fmt::Display> {
    /// The display sink failed mid-session.
    #[error("display sink failure: {0}")]
    Sink(E),

    /// The input listener disconnected before a quit command arrived.
    #[error("input listener disconnected before quit")]
    ListenerDisconnected,
}

/// A replay session over one frame log and one display sink.
pub struct ReplaySession<S: DisplaySink> {
    log: FrameLog,
    sink: S,
    state: PlaybackState,
    undo: UndoStack,
    screen: ScreenBuffer,
    queue_capacity: usize,
}

impl<S: DisplaySink> ReplaySession<S> {
    /// Create a session positioned before the first frame.
    pub fn new(log: FrameLog, sink: S, config: &SessionConfig) -> Self {
        let (width, height) = sink.size();
        Self {
            log,
            sink,
            state: PlaybackState::new(config.auto, config.speed),
            undo: UndoStack::new(),
            screen: ScreenBuffer::with_size(width, height),
            // sync_channel(0) is a rendezvous channel; keep at least one slot.
            queue_capacity: config.queue_capacity.max(1),
        }
    }

    /// Index of the next frame to apply going forward.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    /// Current playback state.
    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Depth of the undo stack, equal to [`cursor`](Self::cursor) between
    /// commands.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Borrow the display sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give the sink back, dropping the session.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run the session to completion, reading input from `input`.
    ///
    /// An empty log is a no-op: the loop is never entered and no listener is
    /// spawned. Otherwise the loop ends on `Quit` (or a fatal error), the
    /// listener is stopped and joined, and the sink is handed back for
    /// inspection.
    pub fn run<I>(mut self, input: I) -> Result<S, SessionError<S::Error>>
    where
        I: InputSource + Send + 'static,
    {
        if self.log.is_empty() {
            debug!("empty frame log, nothing to replay");
            return Ok(self.sink);
        }
        info!(
            frames = self.log.len(),
            auto = self.state.auto,
            speed = %self.state.speed,
            "replay session started"
        );

        let (tx, rx) = mpsc::sync_channel(self.queue_capacity);
        let listener = InputListener::spawn(input, tx);
        let outcome = self.event_loop(&rx);

        // Drop the receiver before joining so a listener blocked on a full
        // queue sees the disconnect instead of deadlocking the join.
        drop(rx);
        listener.stop();

        info!(cursor = self.state.cursor, "replay session ended");
        outcome.map(|()| self.sink)
    }

    fn event_loop(&mut self, rx: &Receiver<ReplayCommand>) -> Result<(), SessionError<S::Error>> {
        loop {
            let command = match advance_delay(&self.state, &self.log) {
                Some(delay) => match rx.recv_timeout(delay) {
                    Ok(command) => command,
                    Err(RecvTimeoutError::Timeout) => ReplayCommand::Next,
                    Err(RecvTimeoutError::Disconnected) => {
                        return Err(SessionError::ListenerDisconnected);
                    }
                },
                None => rx
                    .recv()
                    .map_err(|_| SessionError::ListenerDisconnected)?,
            };
            if self.apply_command(command)? {
                return Ok(());
            }
        }
    }

    /// Apply one command directly, bypassing the queue and timer.
    ///
    /// Returns `true` when the command ends the session. This is the manual
    /// stepping surface; [`run`](Self::run) dispatches through it too.
    pub fn apply_command(
        &mut self,
        command: ReplayCommand,
    ) -> Result<bool, SessionError<S::Error>> {
        let (next, action) = transition(&self.state, command, self.log.len());
        self.state = next;
        let quit = match action {
            Action::Apply { frame } => {
                self.apply_frame(frame)?;
                false
            }
            Action::Undo => {
                self.undo_frame()?;
                false
            }
            Action::None => false,
            Action::Quit => true,
        };
        debug_assert_eq!(self.undo.len(), self.state.cursor);
        Ok(quit)
    }

    /// Apply the frame at `index`: capture pre-images, write the new content
    /// to shadow screen and sink, flush once.
    fn apply_frame(&mut self, index: usize) -> Result<(), SessionError<S::Error>> {
        let Some(frame) = self.log.get(index) else {
            return Ok(());
        };
        let mut entry = UndoEntry::with_capacity(frame.draws.len());
        for draw in &frame.draws {
            entry.record(draw.index, self.screen.get(draw.index));
            self.screen.set(draw.index, draw.content);
            let (x, y) = self.sink.coordinate_of(draw.index);
            self.sink
                .set_cell(x, y, draw.content)
                .map_err(SessionError::Sink)?;
        }
        self.undo.push(entry);
        self.sink.flush().map_err(SessionError::Sink)?;
        trace!(frame = index, draws = frame.draws.len(), "frame applied");
        Ok(())
    }

    /// Write the popped pre-images back, in capture order, and flush once.
    fn undo_frame(&mut self) -> Result<(), SessionError<S::Error>> {
        let Some(entry) = self.undo.pop() else {
            return Ok(());
        };
        for draw in entry.draws() {
            self.screen.set(draw.index, draw.content);
            let (x, y) = self.sink.coordinate_of(draw.index);
            self.sink
                .set_cell(x, y, draw.content)
                .map_err(SessionError::Sink)?;
        }
        self.sink.flush().map_err(SessionError::Sink)?;
        trace!(draws = entry.len(), "frame undone");
        Ok(())
    }
}
