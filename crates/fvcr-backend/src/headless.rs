#![forbid(unsafe_code)]

//! In-memory backend: a headless grid sink and a scripted input source.
//!
//! [`HeadlessSink`] keeps the presented screen in a flat cell vector, making
//! it the test vehicle for the engine and a replay-to-buffer surface for
//! embedders that want the final screen state without a terminal.
//!
//! [`ScriptedInput`] replays a queue of prepared events, each optionally
//! delayed relative to the first poll, so tests can stage input that arrives
//! while the engine is mid-race.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::time::{Duration, Instant};

use fvcr_core::cell::CellContent;
use fvcr_core::event::RawEvent;

use crate::{DisplaySink, InputSource};

/// An in-memory display sink.
///
/// Cells outside the grid are clipped, matching how a real terminal discards
/// out-of-range writes. Flushes are counted so tests can assert the batched
/// one-flush-per-frame contract.
#[derive(Debug, Clone)]
pub struct HeadlessSink {
    width: u16,
    height: u16,
    cells: Vec<CellContent>,
    flushes: usize,
}

impl HeadlessSink {
    /// Create a blank grid of the given dimensions.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![CellContent::default(); size],
            flushes: 0,
        }
    }

    /// Content at (x, y), or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: u16, y: u16) -> Option<&CellContent> {
        if x < self.width && y < self.height {
            Some(&self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)])
        } else {
            None
        }
    }

    /// Content at a flat row-major offset, or `None` outside the grid.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<&CellContent> {
        self.cells.get(index)
    }

    /// The whole grid as a flat row-major slice.
    #[must_use]
    pub fn cells(&self) -> &[CellContent] {
        &self.cells
    }

    /// Number of flushes presented so far.
    #[must_use]
    pub const fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl DisplaySink for HeadlessSink {
    type Error = Infallible;

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, content: CellContent) -> Result<(), Infallible> {
        if x < self.width && y < self.height {
            let index = usize::from(y) * usize::from(self.width) + usize::from(x);
            self.cells[index] = content;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        self.flushes += 1;
        Ok(())
    }
}

/// A scripted event in a [`ScriptedInput`] queue.
#[derive(Debug, Clone, Copy)]
struct ScriptedEvent {
    event: RawEvent,
    /// Delay relative to the first poll before the event becomes available.
    after: Duration,
}

/// An input source that replays a prepared event script.
///
/// Events become available in order; an event with a delay holds back
/// everything queued behind it. Once the script is drained, polls sleep for
/// their full timeout, mimicking an idle terminal.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: VecDeque<ScriptedEvent>,
    epoch: Option<Instant>,
}

impl ScriptedInput {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event that is available immediately.
    pub fn push(&mut self, event: RawEvent) {
        self.push_after(event, Duration::ZERO);
    }

    /// Queue an event that becomes available `after` the first poll.
    pub fn push_after(&mut self, event: RawEvent, after: Duration) {
        self.script.push_back(ScriptedEvent { event, after });
    }

    /// Queue several immediately-available events.
    pub fn extend(&mut self, events: impl IntoIterator<Item = RawEvent>) {
        for event in events {
            self.push(event);
        }
    }

    /// Number of events not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn front_ready_at(&mut self) -> Option<Instant> {
        let epoch = *self.epoch.get_or_insert_with(Instant::now);
        self.script.front().map(|s| epoch + s.after)
    }
}

impl InputSource for ScriptedInput {
    type Error = Infallible;

    fn poll_input(&mut self, timeout: Duration) -> Result<bool, Infallible> {
        let Some(ready_at) = self.front_ready_at() else {
            std::thread::sleep(timeout);
            return Ok(false);
        };
        let now = Instant::now();
        if now >= ready_at {
            return Ok(true);
        }
        std::thread::sleep((ready_at - now).min(timeout));
        Ok(Instant::now() >= ready_at)
    }

    fn read_input(&mut self) -> Result<Option<RawEvent>, Infallible> {
        let Some(ready_at) = self.front_ready_at() else {
            return Ok(None);
        };
        if Instant::now() >= ready_at {
            Ok(self.script.pop_front().map(|s| s.event))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fvcr_core::event::{KeyCode, KeyEvent};

    fn key(c: char) -> RawEvent {
        RawEvent::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    #[test]
    fn sink_starts_blank() {
        let sink = HeadlessSink::new(4, 3);
        assert_eq!(sink.size(), (4, 3));
        assert_eq!(sink.cells().len(), 12);
        assert!(sink.cells().iter().all(CellContent::is_blank));
        assert_eq!(sink.flush_count(), 0);
    }

    #[test]
    fn writes_land_at_coordinates() {
        let mut sink = HeadlessSink::new(4, 3);
        sink.set_cell(2, 1, CellContent::new('x')).unwrap();
        assert_eq!(sink.cell(2, 1).unwrap().glyph, 'x');
        assert_eq!(sink.cell_at(6).unwrap().glyph, 'x');
    }

    #[test]
    fn out_of_range_writes_are_clipped() {
        let mut sink = HeadlessSink::new(2, 2);
        sink.set_cell(5, 5, CellContent::new('x')).unwrap();
        assert!(sink.cells().iter().all(CellContent::is_blank));
        assert!(sink.cell(5, 5).is_none());
    }

    #[test]
    fn flushes_are_counted() {
        let mut sink = HeadlessSink::new(1, 1);
        sink.flush().unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.flush_count(), 2);
    }

    #[test]
    fn script_drains_in_order() {
        let mut input = ScriptedInput::new();
        input.extend([key('a'), key('b')]);
        assert_eq!(input.remaining(), 2);
        assert!(input.poll_input(Duration::from_millis(1)).unwrap());
        assert_eq!(input.read_input().unwrap(), Some(key('a')));
        assert_eq!(input.read_input().unwrap(), Some(key('b')));
        assert_eq!(input.read_input().unwrap(), None);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn empty_script_times_out() {
        let mut input = ScriptedInput::new();
        let start = Instant::now();
        assert!(!input.poll_input(Duration::from_millis(20)).unwrap());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn delayed_event_is_held_back() {
        let mut input = ScriptedInput::new();
        input.push_after(key('x'), Duration::from_millis(40));
        assert!(!input.poll_input(Duration::from_millis(5)).unwrap());
        assert_eq!(input.read_input().unwrap(), None);
        std::thread::sleep(Duration::from_millis(50));
        assert!(input.poll_input(Duration::from_millis(1)).unwrap());
        assert_eq!(input.read_input().unwrap(), Some(key('x')));
    }
}
