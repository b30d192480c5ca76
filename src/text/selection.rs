//! Selection range and cursor movement types.

use std::ops::Range;

/// A non-empty selection between an anchor and a live end.
///
/// The anchor stays put while the live end follows the cursor (shift-extend,
/// pointer drag). An anchor equal to the live end is not a selection, so
/// [`Selection::new`] returns `None` for it and `start() < end()` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    anchor: usize,
    live: usize,
}

impl Selection {
    /// Create a selection, or `None` when `anchor == live`.
    #[must_use]
    pub fn new(anchor: usize, live: usize) -> Option<Self> {
        (anchor != live).then_some(Self { anchor, live })
    }

    #[must_use]
    pub fn anchor(self) -> usize {
        self.anchor
    }

    #[must_use]
    pub fn live(self) -> usize {
        self.live
    }

    #[must_use]
    pub fn start(self) -> usize {
        self.anchor.min(self.live)
    }

    #[must_use]
    pub fn end(self) -> usize {
        self.anchor.max(self.live)
    }

    /// Normalized half-open range.
    #[must_use]
    pub fn range(self) -> Range<usize> {
        self.start()..self.end()
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end() - self.start()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(self) -> bool {
        false
    }

    /// True when the live end sits before the anchor.
    #[must_use]
    pub fn is_backward(self) -> bool {
        self.live < self.anchor
    }
}

/// Cursor movement requested by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMove {
    /// Relative move by a number of cells.
    By(isize),
    /// Absolute cell index.
    To(usize),
    /// Start of the buffer.
    Start,
    /// End of the buffer.
    End,
    /// Start of the current logical line.
    LineStart,
    /// End of the current logical line (before its line break).
    LineEnd,
}
