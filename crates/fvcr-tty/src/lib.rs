#![forbid(unsafe_code)]

//! Native terminal backend for FrankenVCR, built on Crossterm.
//!
//! [`TtySink`] presents replayed cells on the real terminal: raw mode plus
//! alternate screen with mouse capture, entered on construction and restored
//! in reverse order on drop so no exit path leaks terminal state. Cell writes
//! are queued into a buffered writer and presented by `flush`, one batch per
//! frame.
//!
//! [`TtyInput`] is the matching input half over Crossterm's global event
//! stream. It reports key presses, mouse buttons, and resizes as canonical
//! [`RawEvent`]s; everything else (focus, paste, key releases) is filtered
//! here so the listener only sees input the replay mapping can use.

use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, KeyEventKind, MouseEventKind as CtMouseKind,
};
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use tracing::debug;

use fvcr_backend::{DisplaySink, InputSource};
use fvcr_core::cell::{CellContent, Color};
use fvcr_core::event::{
    KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind, RawEvent,
};

/// Crossterm-backed display sink.
///
/// Construction claims the terminal (raw mode, alternate screen, hidden
/// cursor, mouse capture); drop releases everything in reverse order, on
/// every exit path short of an abort.
pub struct TtySink {
    out: BufWriter<Stdout>,
    width: u16,
    height: u16,
}

impl TtySink {
    /// Claim the terminal and clear it.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = BufWriter::new(io::stdout());
        if let Err(error) = execute!(
            out,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Hide,
            EnableMouseCapture,
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(error);
        }
        let (width, height) = terminal::size()?;
        debug!(width, height, "tty sink initialized");
        Ok(Self { out, width, height })
    }
}

impl DisplaySink for TtySink {
    type Error = io::Error;

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, content: CellContent) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetForegroundColor(convert_color(content.fg)),
            SetBackgroundColor(convert_color(content.bg)),
            Print(content.glyph),
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for TtySink {
    fn drop(&mut self) {
        // Reverse order of setup; best effort on every step.
        let _ = execute!(
            self.out,
            DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Crossterm-backed input source.
///
/// A unit handle: Crossterm's event stream is process-global, so this type
/// carries no state and exists to own the `InputSource` implementation.
#[derive(Debug, Default)]
pub struct TtyInput;

impl TtyInput {
    /// Create an input handle.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TtyInput {
    type Error = io::Error;

    fn poll_input(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read_input(&mut self) -> io::Result<Option<RawEvent>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        Ok(convert_event(event::read()?))
    }
}

/// Map a cell color onto Crossterm's color type.
fn convert_color(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as Ct;
    match color {
        Color::Default => Ct::Reset,
        Color::Named(n) | Color::Indexed(n) => Ct::AnsiValue(n),
        Color::Rgb(r, g, b) => Ct::Rgb { r, g, b },
    }
}

/// Translate a Crossterm event into a canonical raw event.
///
/// Key repeats and releases, focus changes, and pastes are dropped here.
fn convert_event(event: event::Event) -> Option<RawEvent> {
    match event {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => {
            let code = convert_key_code(key.code)?;
            Some(RawEvent::Key(
                KeyEvent::new(code).with_modifiers(convert_modifiers(key.modifiers)),
            ))
        }
        event::Event::Mouse(mouse) => {
            let kind = convert_mouse_kind(mouse.kind)?;
            Some(RawEvent::Mouse(MouseEvent::new(
                kind,
                mouse.column,
                mouse.row,
            )))
        }
        event::Event::Resize(width, height) => Some(RawEvent::Resize { width, height }),
        _ => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    use event::KeyCode as Ct;
    match code {
        Ct::Char(c) => Some(KeyCode::Char(c)),
        Ct::Enter => Some(KeyCode::Enter),
        Ct::Esc => Some(KeyCode::Escape),
        Ct::Backspace => Some(KeyCode::Backspace),
        Ct::Tab => Some(KeyCode::Tab),
        Ct::Up => Some(KeyCode::Up),
        Ct::Down => Some(KeyCode::Down),
        Ct::Left => Some(KeyCode::Left),
        Ct::Right => Some(KeyCode::Right),
        Ct::F(n) => Some(KeyCode::F(n)),
        _ => None,
    }
}

fn convert_modifiers(modifiers: event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if modifiers.contains(event::KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if modifiers.contains(event::KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if modifiers.contains(event::KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    out
}

fn convert_mouse_kind(kind: CtMouseKind) -> Option<MouseEventKind> {
    match kind {
        CtMouseKind::Down(button) => Some(MouseEventKind::Down(convert_button(button))),
        CtMouseKind::Up(button) => Some(MouseEventKind::Up(convert_button(button))),
        CtMouseKind::Moved | CtMouseKind::Drag(_) => Some(MouseEventKind::Moved),
        CtMouseKind::ScrollUp => Some(MouseEventKind::ScrollUp),
        CtMouseKind::ScrollDown => Some(MouseEventKind::ScrollDown),
        CtMouseKind::ScrollLeft | CtMouseKind::ScrollRight => None,
    }
}

fn convert_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Middle => MouseButton::Middle,
        event::MouseButton::Right => MouseButton::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_map_onto_crossterm() {
        use crossterm::style::Color as Ct;
        assert_eq!(convert_color(Color::Default), Ct::Reset);
        assert_eq!(convert_color(Color::Named(4)), Ct::AnsiValue(4));
        assert_eq!(convert_color(Color::Indexed(237)), Ct::AnsiValue(237));
        assert_eq!(
            convert_color(Color::Rgb(1, 2, 3)),
            Ct::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn key_press_converts_with_modifiers() {
        let ct = event::Event::Key(event::KeyEvent::new(
            event::KeyCode::Char('Q'),
            event::KeyModifiers::SHIFT,
        ));
        let converted = convert_event(ct).unwrap();
        let RawEvent::Key(key) = converted else {
            panic!("expected key event");
        };
        assert!(key.is_char('Q'));
        assert!(key.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn key_release_is_dropped() {
        let mut ct = event::KeyEvent::new(event::KeyCode::Char('x'), event::KeyModifiers::NONE);
        ct.kind = KeyEventKind::Release;
        assert_eq!(convert_event(event::Event::Key(ct)), None);
    }

    #[test]
    fn mouse_buttons_convert() {
        let ct = event::Event::Mouse(event::MouseEvent {
            kind: CtMouseKind::Down(event::MouseButton::Middle),
            column: 3,
            row: 7,
            modifiers: event::KeyModifiers::NONE,
        });
        let converted = convert_event(ct).unwrap();
        assert_eq!(
            converted,
            RawEvent::Mouse(MouseEvent::new(
                MouseEventKind::Down(MouseButton::Middle),
                3,
                7
            ))
        );
    }

    #[test]
    fn resize_converts_to_the_interrupt_event() {
        let converted = convert_event(event::Event::Resize(120, 40)).unwrap();
        assert_eq!(
            converted,
            RawEvent::Resize {
                width: 120,
                height: 40
            }
        );
    }

    #[test]
    fn focus_changes_are_dropped() {
        assert_eq!(convert_event(event::Event::FocusGained), None);
        assert_eq!(convert_event(event::Event::FocusLost), None);
    }
}
