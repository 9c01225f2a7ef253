#![forbid(unsafe_code)]

//! Cast file loading and the `fvcr` terminal replay player.
//!
//! The engine deliberately owns no file format; this crate does. [`cast`]
//! reads recorded frame logs from gzip-compressed JSONL cast files, and
//! [`cli`] wires them to a [`ReplaySession`](fvcr_engine::ReplaySession) over
//! the native terminal backend.

pub mod cast;
pub mod cli;

pub use cast::{CastFile, CastReader, SCHEMA_VERSION};
pub use cli::{Cli, run, run_from_env};
