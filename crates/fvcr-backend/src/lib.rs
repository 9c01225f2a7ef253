#![forbid(unsafe_code)]

//! Backend traits for FrankenVCR: platform abstraction for the display sink
//! and raw input.
//!
//! This crate defines the boundary between the replay engine and
//! platform-specific backends (native terminal via `fvcr-tty`, in-memory via
//! [`headless`]). The engine is generic over these traits and never touches a
//! terminal directly.
//!
//! The surface is deliberately split in two:
//!
//! - [`DisplaySink`] is the write-only output half: cell mutation, coordinate
//!   mapping, and batched flush. It has no read operation; the engine keeps
//!   its own shadow of the screen for undo pre-images.
//! - [`InputSource`] is the input half: bounded polling plus a non-blocking
//!   read. The bounded poll is what lets the input listener honor its stop
//!   signal between polls instead of parking forever in a blocking read.

use core::time::Duration;

use fvcr_core::cell::CellContent;
use fvcr_core::event::RawEvent;

pub mod headless;

pub use headless::{HeadlessSink, ScriptedInput};

/// Write-only cell surface: the output half of the backend boundary.
///
/// The engine is the sole writer. Draw indexes in a frame log are flat
/// row-major offsets; [`coordinate_of`](Self::coordinate_of) maps them to
/// the backend's coordinate space.
pub trait DisplaySink {
    /// Platform-specific error type.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Current surface dimensions (columns, rows).
    fn size(&self) -> (u16, u16);

    /// Map a flat grid offset to (x, y) coordinates.
    ///
    /// The default is row-major over [`size`](Self::size). A backend with a
    /// different memory layout overrides this.
    fn coordinate_of(&self, index: usize) -> (u16, u16) {
        let (width, _) = self.size();
        let width = usize::from(width.max(1));
        ((index % width) as u16, (index / width) as u16)
    }

    /// Write one cell. Takes effect on the next [`flush`](Self::flush).
    fn set_cell(&mut self, x: u16, y: u16, content: CellContent) -> Result<(), Self::Error>;

    /// Present all cell writes since the previous flush.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Raw input half of the backend boundary.
///
/// Mirrors the poll/read split of terminal event APIs: `poll_input` waits up
/// to `timeout` for input to become available, `read_input` consumes it.
pub trait InputSource {
    /// Platform-specific error type.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Wait up to `timeout` for input, returning `true` if some is ready.
    ///
    /// Must not block longer than `timeout`. Returns `Ok(false)` on timeout.
    fn poll_input(&mut self, timeout: Duration) -> Result<bool, Self::Error>;

    /// Read the next available event, or `None` if none is ready.
    ///
    /// Call after `poll_input` returns `true`, or speculatively.
    fn read_input(&mut self) -> Result<Option<RawEvent>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use fvcr_core::event::{KeyCode, KeyEvent};

    struct MockSink {
        width: u16,
        height: u16,
        writes: Vec<(u16, u16, CellContent)>,
        flushes: usize,
    }

    impl MockSink {
        fn new(width: u16, height: u16) -> Self {
            Self {
                width,
                height,
                writes: Vec::new(),
                flushes: 0,
            }
        }
    }

    impl DisplaySink for MockSink {
        type Error = Infallible;

        fn size(&self) -> (u16, u16) {
            (self.width, self.height)
        }

        fn set_cell(&mut self, x: u16, y: u16, content: CellContent) -> Result<(), Infallible> {
            self.writes.push((x, y, content));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.flushes += 1;
            Ok(())
        }
    }

    struct MockInput {
        events: Vec<RawEvent>,
    }

    impl InputSource for MockInput {
        type Error = Infallible;

        fn poll_input(&mut self, _timeout: Duration) -> Result<bool, Infallible> {
            Ok(!self.events.is_empty())
        }

        fn read_input(&mut self) -> Result<Option<RawEvent>, Infallible> {
            Ok(if self.events.is_empty() {
                None
            } else {
                Some(self.events.remove(0))
            })
        }
    }

    #[test]
    fn default_coordinate_mapping_is_row_major() {
        let sink = MockSink::new(80, 24);
        assert_eq!(sink.coordinate_of(0), (0, 0));
        assert_eq!(sink.coordinate_of(79), (79, 0));
        assert_eq!(sink.coordinate_of(80), (0, 1));
        assert_eq!(sink.coordinate_of(80 * 23 + 5), (5, 23));
    }

    #[test]
    fn coordinate_mapping_survives_zero_width() {
        let sink = MockSink::new(0, 0);
        assert_eq!(sink.coordinate_of(7), (0, 7));
    }

    #[test]
    fn sink_records_writes_and_flushes() {
        let mut sink = MockSink::new(10, 10);
        sink.set_cell(1, 2, CellContent::new('x')).unwrap();
        sink.set_cell(3, 4, CellContent::new('y')).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.writes.len(), 2);
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn input_poll_and_read_drain_events() {
        let mut input = MockInput {
            events: vec![
                RawEvent::Key(KeyEvent::new(KeyCode::Char('a'))),
                RawEvent::Resize {
                    width: 80,
                    height: 24,
                },
            ],
        };
        assert!(input.poll_input(Duration::from_millis(1)).unwrap());
        assert!(input.read_input().unwrap().is_some());
        assert!(input.read_input().unwrap().is_some());
        assert!(input.read_input().unwrap().is_none());
        assert!(!input.poll_input(Duration::from_millis(1)).unwrap());
    }
}
