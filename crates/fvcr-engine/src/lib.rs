#![forbid(unsafe_code)]

//! Playback controller, undo stack, and timing policy for FrankenVCR replay
//! sessions.
//!
//! # Role in FrankenVCR
//! `fvcr-engine` is the VCR deck. Given a [`FrameLog`](fvcr_core::FrameLog)
//! and a display backend, a [`ReplaySession`] applies frames forward at a
//! speed-scaled pace derived from the recorded timing, steps in either
//! direction under user control, and reverses already-applied frames exactly
//! using per-frame pre-images.
//!
//! # Architecture
//! Two threads: the [`listener`] polls the backend for raw input and pushes
//! translated commands onto a bounded queue; the session loop is the sole
//! consumer and the sole owner of the frame pointer, the undo stack, the
//! shadow screen, and the sink. Auto-advance is the queue receive's timeout:
//! if no command arrives within the computed gap, a forward step is
//! synthesized. A real command winning the race inherently discards the
//! pending timeout, so no stale timer can fire later.
//!
//! The state machine itself ([`playback`]) is a pure function over
//! `(state, command)` and is tested in isolation from all of the above.

pub mod listener;
pub mod playback;
pub mod screen;
pub mod session;
pub mod stop;
pub mod timing;
pub mod undo;

pub use listener::InputListener;
pub use playback::{Action, PlaybackState, Speed, transition};
pub use session::{ReplaySession, SessionConfig, SessionError};
pub use stop::{StopSignal, StopTrigger};
pub use timing::advance_delay;
pub use undo::{UndoEntry, UndoStack};
