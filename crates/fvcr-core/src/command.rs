#![forbid(unsafe_code)]

//! Replay commands and the raw-input mapping that produces them.
//!
//! [`ReplayCommand`] is the closed semantic vocabulary of a replay session.
//! [`translate`] is the single mapping from raw backend input to commands;
//! input the mapping does not recognize yields `None` and is dropped by the
//! listener.

use crate::event::{KeyCode, MouseButton, MouseEventKind, RawEvent};

/// A semantic replay command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplayCommand {
    /// Step forward one frame.
    Next,
    /// Step backward one frame.
    Previous,
    /// Toggle automatic advance.
    TogglePause,
    /// End the replay session.
    Quit,
    /// Double the playback speed (capped at 16x).
    SpeedUp,
    /// Halve the playback speed (floored at 1x).
    SpeedDown,
}

/// Translate a raw input event into a replay command.
///
/// Keyboard: `Q` quits; `p` and space toggle pause; `+`/`>` and `-`/`<`
/// change speed; `.`, `6`, `j`, `n` step forward; `4`, `k`, `N` step
/// backward. Mouse: left steps forward, middle toggles pause, right steps
/// backward. A resize always maps to a forward step so the screen is redrawn;
/// it must not be filtered even while paused.
#[must_use]
pub fn translate(event: &RawEvent) -> Option<ReplayCommand> {
    match event {
        RawEvent::Resize { .. } => Some(ReplayCommand::Next),
        RawEvent::Key(key) => match key.code {
            KeyCode::Char('Q') => Some(ReplayCommand::Quit),
            KeyCode::Char('p' | ' ') => Some(ReplayCommand::TogglePause),
            KeyCode::Char('+' | '>') => Some(ReplayCommand::SpeedUp),
            KeyCode::Char('-' | '<') => Some(ReplayCommand::SpeedDown),
            KeyCode::Char('.' | '6' | 'j' | 'n') => Some(ReplayCommand::Next),
            KeyCode::Char('4' | 'k' | 'N') => Some(ReplayCommand::Previous),
            _ => None,
        },
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(ReplayCommand::Next),
            MouseEventKind::Down(MouseButton::Middle) => Some(ReplayCommand::TogglePause),
            MouseEventKind::Down(MouseButton::Right) => Some(ReplayCommand::Previous),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyEvent, MouseEvent};

    fn key(c: char) -> RawEvent {
        RawEvent::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    fn click(button: MouseButton) -> RawEvent {
        RawEvent::Mouse(MouseEvent::new(MouseEventKind::Down(button), 0, 0))
    }

    #[test]
    fn keyboard_mapping() {
        assert_eq!(translate(&key('Q')), Some(ReplayCommand::Quit));
        assert_eq!(translate(&key('p')), Some(ReplayCommand::TogglePause));
        assert_eq!(translate(&key(' ')), Some(ReplayCommand::TogglePause));
        assert_eq!(translate(&key('+')), Some(ReplayCommand::SpeedUp));
        assert_eq!(translate(&key('>')), Some(ReplayCommand::SpeedUp));
        assert_eq!(translate(&key('-')), Some(ReplayCommand::SpeedDown));
        assert_eq!(translate(&key('<')), Some(ReplayCommand::SpeedDown));
        for c in ['.', '6', 'j', 'n'] {
            assert_eq!(translate(&key(c)), Some(ReplayCommand::Next), "key {c}");
        }
        for c in ['4', 'k', 'N'] {
            assert_eq!(translate(&key(c)), Some(ReplayCommand::Previous), "key {c}");
        }
    }

    #[test]
    fn quit_is_uppercase_only() {
        assert_eq!(translate(&key('q')), None);
    }

    #[test]
    fn unbound_keys_are_dropped() {
        assert_eq!(translate(&key('z')), None);
        assert_eq!(translate(&RawEvent::Key(KeyEvent::new(KeyCode::Enter))), None);
        assert_eq!(translate(&RawEvent::Key(KeyEvent::new(KeyCode::Escape))), None);
    }

    #[test]
    fn mouse_mapping() {
        assert_eq!(translate(&click(MouseButton::Left)), Some(ReplayCommand::Next));
        assert_eq!(
            translate(&click(MouseButton::Middle)),
            Some(ReplayCommand::TogglePause)
        );
        assert_eq!(
            translate(&click(MouseButton::Right)),
            Some(ReplayCommand::Previous)
        );
    }

    #[test]
    fn mouse_release_and_motion_are_dropped() {
        let release = RawEvent::Mouse(MouseEvent::new(
            MouseEventKind::Up(MouseButton::Left),
            0,
            0,
        ));
        let moved = RawEvent::Mouse(MouseEvent::new(MouseEventKind::Moved, 3, 4));
        assert_eq!(translate(&release), None);
        assert_eq!(translate(&moved), None);
    }

    #[test]
    fn resize_always_steps_forward() {
        let resize = RawEvent::Resize {
            width: 120,
            height: 40,
        };
        assert_eq!(translate(&resize), Some(ReplayCommand::Next));
    }
}
