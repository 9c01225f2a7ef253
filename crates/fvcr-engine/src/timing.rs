#![forbid(unsafe_code)]

//! The auto-advance timing policy.
//!
//! While playing, the session waits for the recorded gap between the current
//! frame and its successor before synthesizing a forward step. The raw gap is
//! clamped to [`MAX_GAP`] so a long recorded pause does not stall playback,
//! divided by the speed factor, and floored at [`MIN_DELAY`] so high speeds
//! cannot degenerate into a busy loop.
//!
//! The gap is computed against `cursor + 1`, so the transition *into* the
//! final frame is never auto-timed: once the cursor reaches `N - 1` the
//! session blocks on the command queue alone and the last step must come from
//! the user (or a resize interrupt).

use std::time::Duration;

use fvcr_core::frame::FrameLog;

use crate::playback::PlaybackState;

/// Longest honored recorded gap between two frames.
pub const MAX_GAP: Duration = Duration::from_secs(2);

/// Shortest armed auto-advance delay.
pub const MIN_DELAY: Duration = Duration::from_millis(10);

/// Delay before the next synthesized forward step, or `None` when no timer
/// should be armed (paused, or no successor gap to measure).
#[must_use]
pub fn advance_delay(state: &PlaybackState, log: &FrameLog) -> Option<Duration> {
    if !state.auto {
        return None;
    }
    let gap = log.gap(state.cursor)?;
    Some((gap.min(MAX_GAP) / state.speed.factor()).max(MIN_DELAY))
}
