#![forbid(unsafe_code)]

//! Frame log data model, input events, and replay commands for FrankenVCR.
//!
//! # Role in FrankenVCR
//! `fvcr-core` is the dependency-light foundation: the cell payloads a
//! recording mutates, the time-stamped frames that group them, the raw input
//! events a display backend produces, and the closed set of replay commands
//! they translate into.
//!
//! # Primary responsibilities
//! - **Cell/Color**: the atomic cell payload written to the screen and
//!   captured by undo entries.
//! - **Frame/FrameLog**: the immutable, ordered recording being replayed.
//! - **RawEvent**: canonical keyboard/mouse/resize input.
//! - **ReplayCommand**: the semantic command set plus the input mapping.
//!
//! # How it fits in the system
//! `fvcr-backend` defines the platform traits over these types, and
//! `fvcr-engine` consumes them to drive a replay session. Nothing here does
//! I/O; everything is plain data with total operations.

pub mod cell;
pub mod command;
pub mod event;
pub mod frame;

pub use cell::{CellContent, Color};
pub use command::{ReplayCommand, translate};
pub use event::{KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind, RawEvent};
pub use frame::{CellDraw, Frame, FrameLog};
