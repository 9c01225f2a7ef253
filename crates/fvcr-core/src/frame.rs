#![forbid(unsafe_code)]

//! Frames and the frame log: the recording being replayed.
//!
//! A [`Frame`] is one time-stamped batch of cell mutations; a [`FrameLog`] is
//! the ordered, immutable sequence of frames a replay session consumes.
//! Timestamps are monotonic durations since the start of the recording, at
//! millisecond resolution.
//!
//! Draw order within a frame matters only for undo pairing: the pre-image of
//! each draw is captured in the same order the draws apply. It does not
//! affect visual correctness, since draws target independent cells.

use std::time::Duration;

use crate::cell::CellContent;

/// One atomic cell mutation: a flat grid offset and the new content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDraw {
    /// Flat offset into the grid (row-major).
    pub index: usize,
    /// The content written to the cell.
    pub content: CellContent,
}

impl CellDraw {
    /// Create a new cell draw.
    #[must_use]
    pub const fn new(index: usize, content: CellContent) -> Self {
        Self { index, content }
    }
}

/// One recorded, time-stamped batch of cell mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Monotonic recording time of this frame.
    pub at: Duration,
    /// Cell mutations, in recorded order.
    pub draws: Vec<CellDraw>,
}

impl Frame {
    /// Create an empty frame at the given recording time.
    #[must_use]
    pub const fn new(at: Duration) -> Self {
        Self {
            at,
            draws: Vec::new(),
        }
    }

    /// Create a frame with the given draws.
    #[must_use]
    pub fn with_draws(at: Duration, draws: Vec<CellDraw>) -> Self {
        Self { at, draws }
    }

    /// Number of draws in this frame.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }
}

/// The ordered, immutable sequence of frames for one replay session.
///
/// The log is loaded once and never mutated; the frame pointer and undo stack
/// live in the session, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLog {
    frames: Vec<Frame>,
}

impl FrameLog {
    /// Wrap an ordered sequence of frames.
    #[must_use]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Number of frames in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the log has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Get the frame at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// All frames, in order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Recorded gap between frame `index` and its successor.
    ///
    /// Returns `None` when `index + 1` is out of range. Saturates to zero for
    /// a non-monotonic pair rather than panicking on malformed input.
    #[must_use]
    pub fn gap(&self, index: usize) -> Option<Duration> {
        let current = self.frames.get(index)?;
        let next = self.frames.get(index + 1)?;
        Some(next.at.saturating_sub(current.at))
    }

    /// Recording time of the last frame, or zero for an empty log.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.frames.last().map_or(Duration::ZERO, |f| f.at)
    }
}

impl std::ops::Index<usize> for FrameLog {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}
