#![forbid(unsafe_code)]

//! The session-owned shadow of the display surface.
//!
//! The [`DisplaySink`](fvcr_backend::DisplaySink) interface is write-only, so
//! undo pre-images cannot be read back from the backend; they are read from
//! this flat cell buffer instead, which tracks every write the session makes.
//! The buffer grows on demand so a draw index beyond the initial surface size
//! still yields a total read/write pair and undo pairing never goes partial.

use fvcr_core::cell::CellContent;

/// Flat, growable mirror of the presented screen.
#[derive(Debug, Clone, Default)]
pub struct ScreenBuffer {
    cells: Vec<CellContent>,
}

impl ScreenBuffer {
    /// Create a buffer pre-sized for a `width` x `height` surface.
    #[must_use]
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            cells: vec![CellContent::default(); usize::from(width) * usize::from(height)],
        }
    }

    /// Current content at a flat offset.
    ///
    /// Offsets beyond the buffer read as blank default cells, exactly what
    /// an untouched cell holds.
    #[must_use]
    pub fn get(&self, index: usize) -> CellContent {
        self.cells.get(index).copied().unwrap_or_default()
    }

    /// Write content at a flat offset, growing the buffer if needed.
    pub fn set(&mut self, index: usize, content: CellContent) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, CellContent::default());
        }
        self.cells[index] = content;
    }

    /// Number of cells currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether the buffer tracks no cells yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
