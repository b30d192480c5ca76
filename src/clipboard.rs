//! Color-preserving clipboard.
//!
//! Copy captures `(text, color)` pairs from a buffer range; paste replays them
//! at the cursor with their original colors, bypassing color resolution.

use std::ops::Range;

use crate::cell::{Cell, RichItem};
use crate::text::TextBuffer;

/// Captured clipboard content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipboardStore {
    items: Vec<RichItem>,
}

impl ClipboardStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content with the cells of `range` (clamped to the buffer).
    ///
    /// An empty range leaves the previous content in place and returns false.
    pub fn capture(&mut self, buffer: &TextBuffer, range: Range<usize>) -> bool {
        let len = buffer.len();
        let end = range.end.min(len);
        let range = range.start.min(end)..end;
        if range.is_empty() {
            return false;
        }
        self.items = buffer.cells()[range].iter().map(Cell::to_rich).collect();
        true
    }

    /// Insert the captured items at the buffer's cursor, keeping their colors.
    ///
    /// An active selection is replaced. Returns false when there is nothing
    /// to paste.
    pub fn replay_into(&self, buffer: &mut TextBuffer) -> bool {
        if self.items.is_empty() {
            return false;
        }
        buffer.insert_rich(&self.items);
        true
    }

    /// Replace the content with externally supplied items.
    pub fn set_items(&mut self, items: Vec<RichItem>) {
        self.items = items;
    }

    #[must_use]
    pub fn items(&self) -> &[RichItem] {
        &self.items
    }

    /// Captured text, for handing to a system clipboard.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
