#![forbid(unsafe_code)]

//! The playback state machine: pure transitions over pause, speed, and the
//! frame pointer.
//!
//! State is one explicit record ([`PlaybackState`]) with two orthogonal axes:
//! the auto/paused flag and the frame pointer (`cursor`). [`transition`] is a
//! total function `(state, command, frame_count) -> (state, action)`: every
//! command maps to a new state, with explicit no-ops at both pointer
//! boundaries instead of error signaling. All side effects (applying frames,
//! undoing them, quitting) are described by the returned [`Action`] and
//! performed by the session, which keeps this module trivially testable.
//!
//! # Ordering invariant
//!
//! `Next` applies the frame at the *old* cursor and then advances, so the
//! cursor always indexes "what comes next". `Previous` retreats first and
//! then undoes, so the popped entry corresponds to the frame most recently
//! applied. Swapping either order would apply or undo the wrong frame, which
//! is why the action carries the frame index explicitly.

use fvcr_core::command::ReplayCommand;

/// Playback speed: a power-of-two divisor of the recorded gaps, 1x to 16x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Speed(u8);

impl Speed {
    /// Real-time playback.
    pub const NORMAL: Self = Self(1);
    /// Fastest supported playback.
    pub const MAX: Self = Self(16);

    /// Create a speed from a factor, if it is a power of two in `[1, 16]`.
    #[must_use]
    pub const fn from_factor(factor: u8) -> Option<Self> {
        if factor.is_power_of_two() && factor <= 16 {
            Some(Self(factor))
        } else {
            None
        }
    }

    /// The divisor applied to recorded gaps.
    #[must_use]
    pub const fn factor(self) -> u32 {
        self.0 as u32
    }

    /// Double the speed, saturating at 16x.
    #[must_use]
    pub const fn doubled(self) -> Self {
        if self.0 >= 16 { Self(16) } else { Self(self.0 * 2) }
    }

    /// Halve the speed, saturating at 1x.
    #[must_use]
    pub const fn halved(self) -> Self {
        if self.0 <= 1 { Self(1) } else { Self(self.0 / 2) }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// The controller's mutable state: auto/paused, speed, and frame pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    /// Whether auto-advance is active.
    pub auto: bool,
    /// Current speed factor.
    pub speed: Speed,
    /// Index of the next frame to apply going forward, in `[0, frame_count]`.
    pub cursor: usize,
}

impl PlaybackState {
    /// The initial state of a session: playing, 1x, at the start.
    #[must_use]
    pub fn new(auto: bool, speed: Speed) -> Self {
        Self {
            auto,
            speed,
            cursor: 0,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(true, Speed::NORMAL)
    }
}

/// The side effect a transition asks the session to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do (state-only change or boundary no-op).
    None,
    /// Apply the frame at this index and push its undo entry.
    Apply { frame: usize },
    /// Pop the top undo entry and apply it.
    Undo,
    /// End the session loop.
    Quit,
}

/// Apply one command to the playback state.
///
/// Total over all commands and all states. `frame_count` is the length of the
/// frame log; the cursor is kept within `[0, frame_count]`.
#[must_use]
pub fn transition(
    state: &PlaybackState,
    command: ReplayCommand,
    frame_count: usize,
) -> (PlaybackState, Action) {
    let mut next = *state;
    let action = match command {
        ReplayCommand::Next => {
            if state.cursor >= frame_count {
                Action::None
            } else {
                next.cursor = state.cursor + 1;
                Action::Apply {
                    frame: state.cursor,
                }
            }
        }
        ReplayCommand::Previous => {
            let cursor = state.cursor.min(frame_count);
            if cursor <= 1 {
                next.cursor = cursor;
                Action::None
            } else {
                next.cursor = cursor - 1;
                Action::Undo
            }
        }
        ReplayCommand::TogglePause => {
            next.auto = !state.auto;
            Action::None
        }
        ReplayCommand::SpeedUp => {
            next.speed = state.speed.doubled();
            Action::None
        }
        ReplayCommand::SpeedDown => {
            next.speed = state.speed.halved();
            Action::None
        }
        ReplayCommand::Quit => Action::Quit,
    };
    (next, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn next_applies_then_advances() {
        let state = PlaybackState::default();
        let (next, action) = transition(&state, ReplayCommand::Next, 3);
        assert_eq!(next.cursor, 1);
        assert_eq!(action, Action::Apply { frame: 0 });
    }

    #[test]
    fn next_saturates_at_log_end() {
        let state = PlaybackState {
            cursor: 3,
            ..PlaybackState::default()
        };
        let (next, action) = transition(&state, ReplayCommand::Next, 3);
        assert_eq!(next.cursor, 3);
        assert_eq!(action, Action::None);
    }

    #[test]
    fn previous_retreats_then_undoes() {
        let state = PlaybackState {
            cursor: 3,
            ..PlaybackState::default()
        };
        let (next, action) = transition(&state, ReplayCommand::Previous, 3);
        assert_eq!(next.cursor, 2);
        assert_eq!(action, Action::Undo);
    }

    #[test]
    fn previous_floors_at_one() {
        for cursor in [0, 1] {
            let state = PlaybackState {
                cursor,
                ..PlaybackState::default()
            };
            let (next, action) = transition(&state, ReplayCommand::Previous, 3);
            assert_eq!(next.cursor, cursor);
            assert_eq!(action, Action::None);
        }
    }

    #[test]
    fn previous_clamps_a_cursor_past_the_end() {
        let state = PlaybackState {
            cursor: 10,
            ..PlaybackState::default()
        };
        let (next, action) = transition(&state, ReplayCommand::Previous, 3);
        assert_eq!(next.cursor, 2);
        assert_eq!(action, Action::Undo);
    }

    #[test]
    fn toggle_pause_flips_auto() {
        let state = PlaybackState::default();
        let (paused, action) = transition(&state, ReplayCommand::TogglePause, 3);
        assert!(!paused.auto);
        assert_eq!(action, Action::None);
        let (resumed, _) = transition(&paused, ReplayCommand::TogglePause, 3);
        assert!(resumed.auto);
    }

    #[test]
    fn quit_requests_termination_in_any_state() {
        for cursor in [0, 2, 3] {
            for auto in [true, false] {
                let state = PlaybackState {
                    auto,
                    speed: Speed::MAX,
                    cursor,
                };
                let (next, action) = transition(&state, ReplayCommand::Quit, 3);
                assert_eq!(action, Action::Quit);
                assert_eq!(next, state);
            }
        }
    }

    #[test]
    fn speed_ladder() {
        let mut speed = Speed::NORMAL;
        let mut seen = vec![speed.factor()];
        for _ in 0..6 {
            speed = speed.doubled();
            seen.push(speed.factor());
        }
        assert_eq!(seen, vec![1, 2, 4, 8, 16, 16, 16]);
        for _ in 0..6 {
            speed = speed.halved();
        }
        assert_eq!(speed, Speed::NORMAL);
    }

    #[test]
    fn speed_from_factor_rejects_non_powers() {
        assert_eq!(Speed::from_factor(4), Some(Speed(4)));
        assert_eq!(Speed::from_factor(0), None);
        assert_eq!(Speed::from_factor(3), None);
        assert_eq!(Speed::from_factor(32), None);
    }

    fn arb_command() -> impl Strategy<Value = ReplayCommand> {
        prop_oneof![
            Just(ReplayCommand::Next),
            Just(ReplayCommand::Previous),
            Just(ReplayCommand::TogglePause),
            Just(ReplayCommand::SpeedUp),
            Just(ReplayCommand::SpeedDown),
        ]
    }

    proptest! {
        /// Speed stays inside {1, 2, 4, 8, 16} under any command sequence.
        #[test]
        fn speed_domain(commands in prop::collection::vec(arb_command(), 0..64)) {
            let mut state = PlaybackState::default();
            for command in commands {
                (state, _) = transition(&state, command, 10);
                prop_assert!([1, 2, 4, 8, 16].contains(&state.speed.factor()));
            }
        }

        /// The cursor never leaves [0, frame_count], and the implied stack
        /// depth tracks the cursor exactly: pushes and pops pair one-to-one
        /// with forward and backward applications.
        #[test]
        fn cursor_bounds_and_stack_coupling(
            commands in prop::collection::vec(arb_command(), 0..128),
            frame_count in 0usize..8,
        ) {
            let mut state = PlaybackState::default();
            let mut depth = 0usize;
            for command in commands {
                let (next, action) = transition(&state, command, frame_count);
                match action {
                    Action::Apply { frame } => {
                        prop_assert!(frame < frame_count);
                        prop_assert_eq!(frame, state.cursor);
                        depth += 1;
                    }
                    Action::Undo => {
                        prop_assert!(depth > 0, "undo with empty stack");
                        depth -= 1;
                    }
                    Action::None | Action::Quit => {}
                }
                state = next;
                prop_assert!(state.cursor <= frame_count);
                prop_assert_eq!(depth, state.cursor);
            }
        }

        /// Forward saturation: a run of Next commands stops at frame_count.
        #[test]
        fn forward_saturation(extra in 0usize..32, frame_count in 0usize..8) {
            let mut state = PlaybackState::default();
            for _ in 0..frame_count + extra {
                (state, _) = transition(&state, ReplayCommand::Next, frame_count);
            }
            prop_assert_eq!(state.cursor, frame_count);
        }

        /// Backward floor: a run of Previous commands never drops the cursor
        /// below 1 (or moves it at all from 0).
        #[test]
        fn backward_floor(start in 0usize..8, steps in 0usize..32) {
            let frame_count = 8;
            let mut state = PlaybackState { cursor: start, ..PlaybackState::default() };
            for _ in 0..steps {
                (state, _) = transition(&state, ReplayCommand::Previous, frame_count);
            }
            let floor = start.min(1);
            prop_assert!(state.cursor >= floor);
            prop_assert!(state.cursor <= start);
        }
    }
}
