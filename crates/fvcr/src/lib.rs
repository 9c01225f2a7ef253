#![forbid(unsafe_code)]

//! FrankenVCR public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```no_run
//! use fvcr::prelude::*;
//!
//! # fn load() -> FrameLog { FrameLog::default() }
//! let log: FrameLog = load();
//! let sink = HeadlessSink::new(80, 24);
//! let session = ReplaySession::new(log, sink, &SessionConfig::default().paused());
//! let _sink = session.run(ScriptedInput::new()).unwrap();
//! ```

// --- Core re-exports -------------------------------------------------------

pub use fvcr_core::cell::{CellContent, Color};
pub use fvcr_core::command::{ReplayCommand, translate};
pub use fvcr_core::event::{
    KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind, RawEvent,
};
pub use fvcr_core::frame::{CellDraw, Frame, FrameLog};

// --- Backend re-exports ----------------------------------------------------

pub use fvcr_backend::{DisplaySink, HeadlessSink, InputSource, ScriptedInput};

// --- Engine re-exports -----------------------------------------------------

pub use fvcr_engine::{
    InputListener, PlaybackState, ReplaySession, SessionConfig, SessionError, Speed, StopSignal,
    StopTrigger, advance_delay,
};

// --- Native backend --------------------------------------------------------

#[cfg(feature = "tty")]
pub use fvcr_tty::{TtyInput, TtySink};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::{
        CellContent, CellDraw, Color, DisplaySink, Frame, FrameLog, HeadlessSink, InputSource,
        RawEvent, ReplayCommand, ReplaySession, ScriptedInput, SessionConfig, SessionError, Speed,
    };

    #[cfg(feature = "tty")]
    pub use crate::{TtyInput, TtySink};
}
