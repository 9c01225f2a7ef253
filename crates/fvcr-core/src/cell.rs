//! Cell payloads: what a recorded draw writes and what undo restores.
//!
//! A [`CellContent`] is the full visible state of one grid cell: glyph,
//! foreground, background, and the map-membership flag recordings carry for
//! cells that belong to the playfield rather than the HUD. Backward stepping
//! restores these byte-for-byte, so equality here is exact equality.

/// Color for a cell's foreground or background.
///
/// Follows the terminal color model hierarchy:
/// default → 16 named → 256 indexed → 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Terminal default (SGR 39 / SGR 49).
    #[default]
    Default,
    /// Named color index (0-15): standard 8 + bright 8.
    Named(u8),
    /// 256-color palette index (0-255).
    Indexed(u8),
    /// 24-bit true color.
    Rgb(u8, u8, u8),
}

/// The full visible content of one grid cell.
///
/// This is the unit a [`CellDraw`](crate::frame::CellDraw) carries and the
/// unit an undo entry captures as a pre-image. Two contents are interchangeable
/// exactly when they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellContent {
    /// The character shown in the cell.
    pub glyph: char,
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Whether the cell belongs to the map area of the recorded UI.
    ///
    /// Pure bookkeeping for the recording's consumer; replay round-trips it
    /// without interpreting it.
    pub in_map: bool,
}

impl Default for CellContent {
    /// A blank space with default colors, outside the map.
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: Color::Default,
            bg: Color::Default,
            in_map: false,
        }
    }
}

impl CellContent {
    /// Create content with the given glyph and default colors.
    #[must_use]
    pub const fn new(glyph: char) -> Self {
        Self {
            glyph,
            fg: Color::Default,
            bg: Color::Default,
            in_map: false,
        }
    }

    /// Set foreground and background colors.
    #[must_use]
    pub const fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    /// Mark the cell as belonging to the map area.
    #[must_use]
    pub const fn in_map(mut self, in_map: bool) -> Self {
        self.in_map = in_map;
        self
    }

    /// Check if the content is a blank default cell.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content_is_blank_space() {
        let content = CellContent::default();
        assert_eq!(content.glyph, ' ');
        assert_eq!(content.fg, Color::Default);
        assert_eq!(content.bg, Color::Default);
        assert!(!content.in_map);
        assert!(content.is_blank());
    }

    #[test]
    fn builder_sets_all_fields() {
        let content = CellContent::new('@')
            .with_colors(Color::Named(4), Color::Indexed(237))
            .in_map(true);
        assert_eq!(content.glyph, '@');
        assert_eq!(content.fg, Color::Named(4));
        assert_eq!(content.bg, Color::Indexed(237));
        assert!(content.in_map);
        assert!(!content.is_blank());
    }

    #[test]
    fn equality_is_exact_over_every_field() {
        let base = CellContent::new('x').with_colors(Color::Rgb(1, 2, 3), Color::Default);
        assert_eq!(base, base);
        assert_ne!(base, CellContent { glyph: 'y', ..base });
        assert_ne!(
            base,
            CellContent {
                fg: Color::Rgb(1, 2, 4),
                ..base
            }
        );
        assert_ne!(base, base.in_map(true));
    }

    #[test]
    fn color_default_variant() {
        assert_eq!(Color::default(), Color::Default);
    }
}
