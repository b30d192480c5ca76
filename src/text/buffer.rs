//! Cell buffer with cursor, selection and color assignment.
//!
//! # Examples
//!
//! ```
//! use chromatext::{ColorRules, CursorMove, TextBuffer};
//!
//! let mut buf = TextBuffer::with_rules(ColorRules::new().with_fallback(["red", "blue"]));
//! buf.insert_text("ABCD");
//! assert_eq!(buf.cursor(), 4);
//!
//! // Shift-extend two cells to the left, then type over the selection.
//! buf.move_cursor(CursorMove::By(-2), true);
//! buf.insert_character("x", None);
//! assert_eq!(buf.plain_text(), "ABx");
//! ```

use std::ops::Range;

use crate::cell::{Cell, RichItem};
use crate::color::ColorValue;
use crate::event::{LogLevel, emit_log};
use crate::resolve::{ColorResolver, ColorRules};
use crate::text::selection::{CursorMove, Selection};
use crate::unicode::{graphemes, is_line_break, is_single_grapheme};

/// Ordered cells plus cursor and selection.
///
/// Invariants, held after every public call:
///
/// - `cursor() <= len()`
/// - a present selection satisfies `start < end <= len()`
///
/// Arguments are clamped rather than rejected. Mutations that would do
/// nothing (empty input, empty range, delete at a buffer edge) leave the
/// buffer and its [`revision`](Self::revision) untouched.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    cells: Vec<Cell>,
    cursor: usize,
    selection: Option<Selection>,
    resolver: ColorResolver,
    revision: u64,
}

impl TextBuffer {
    /// Create an empty buffer with default color rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with the given color rules.
    #[must_use]
    pub fn with_rules(rules: ColorRules) -> Self {
        Self {
            resolver: ColorResolver::new(rules),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Cursor position: the cursor sits immediately before this index.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Normalized selection range, if a selection is active.
    #[must_use]
    pub fn selection_range(&self) -> Option<Range<usize>> {
        self.selection.map(Selection::range)
    }

    /// Counter bumped by every content mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn resolver(&self) -> &ColorResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut ColorResolver {
        &mut self.resolver
    }

    /// Insert one character at the cursor, replacing any selection.
    ///
    /// The cell takes `color` when given, otherwise the resolver's color.
    /// Empty input is ignored, a line break is inserted as a
    /// [`Cell::LineBreak`], and input holding several graphemes is inserted
    /// one cell per grapheme.
    pub fn insert_character(&mut self, text: &str, color: Option<ColorValue>) {
        if text.is_empty() {
            return;
        }
        if !is_single_grapheme(text) {
            for grapheme in graphemes(text) {
                self.insert_character(grapheme, color.clone());
            }
            return;
        }
        if is_line_break(text) {
            self.insert_line_break();
            return;
        }

        self.delete_selection();
        let color = match color {
            Some(color) => color,
            None => self.resolver.resolve(text, self.cells.len()),
        };
        self.insert_cell(Cell::char(text, color));
    }

    /// Insert a line break at the cursor, replacing any selection.
    pub fn insert_line_break(&mut self) {
        self.delete_selection();
        self.insert_cell(Cell::LineBreak);
    }

    /// Insert a string, one cell per grapheme, resolving every color.
    pub fn insert_text(&mut self, text: &str) {
        for grapheme in graphemes(text) {
            self.insert_character(grapheme, None);
        }
    }

    /// Replay rich items at the cursor, keeping their colors.
    ///
    /// A character item without a color has nothing to preserve and is
    /// resolved normally.
    pub fn insert_rich(&mut self, items: &[RichItem]) {
        for item in items {
            if item.is_line_break() {
                self.insert_line_break();
            } else {
                self.insert_character(&item.text, item.color.clone());
            }
        }
    }

    fn insert_cell(&mut self, cell: Cell) {
        self.cells.insert(self.cursor, cell);
        self.cursor += 1;
        self.touch();
    }

    /// Remove cells in `[start, end)` and put the cursor at `start`.
    ///
    /// No-op when `start >= end` or `end > len()`; callers clamp.
    /// Returns true if anything was removed.
    pub fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end || end > self.cells.len() {
            return false;
        }
        self.cells.drain(start..end);
        self.cursor = start;
        self.selection = None;
        self.touch();
        true
    }

    /// Delete the selected cells. Returns false when nothing is selected.
    pub fn delete_selection(&mut self) -> bool {
        match self.selection_range() {
            Some(range) => self.delete_range(range.start, range.end),
            None => false,
        }
    }

    /// Backspace: delete the selection, else the cell before the cursor.
    pub fn delete_backward(&mut self) {
        if self.delete_selection() || self.cursor == 0 {
            return;
        }
        self.delete_range(self.cursor - 1, self.cursor);
    }

    /// Delete key: delete the selection, else the cell at the cursor.
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let cursor = self.cursor;
        self.delete_range(cursor, cursor + 1);
    }

    /// Move the cursor, clamped to `[0, len()]`.
    ///
    /// With `extend`, the selection's anchor stays where it was (or at the
    /// old cursor when nothing was selected) and its live end follows the
    /// cursor. Without `extend`, the selection is cleared.
    pub fn move_cursor(&mut self, movement: CursorMove, extend: bool) {
        let target = self.target_of(movement);
        if extend {
            let anchor = self.selection.map_or(self.cursor, Selection::anchor);
            self.cursor = target;
            self.selection = Selection::new(anchor, target);
        } else {
            self.cursor = target;
            self.selection = None;
        }
    }

    /// Place the cursor at an absolute index and clear the selection.
    pub fn set_cursor(&mut self, index: usize) {
        self.move_cursor(CursorMove::To(index), false);
    }

    fn target_of(&self, movement: CursorMove) -> usize {
        let len = self.cells.len();
        match movement {
            CursorMove::By(delta) => self.cursor.saturating_add_signed(delta).min(len),
            CursorMove::To(index) => index.min(len),
            CursorMove::Start => 0,
            CursorMove::End => len,
            CursorMove::LineStart => self.cells[..self.cursor]
                .iter()
                .rposition(Cell::is_line_break)
                .map_or(0, |idx| idx + 1),
            CursorMove::LineEnd => self.cells[self.cursor..]
                .iter()
                .position(Cell::is_line_break)
                .map_or(len, |idx| self.cursor + idx),
        }
    }

    /// Store a selection from an anchor/live pair, clamped to the buffer.
    ///
    /// The cursor moves to the live end. Equal ends clear the selection.
    pub fn set_selection(&mut self, anchor: usize, live: usize) {
        let len = self.cells.len();
        self.cursor = live.min(len);
        self.selection = Selection::new(anchor.min(len), self.cursor);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Select every cell and put the cursor at the end.
    pub fn select_all(&mut self) {
        self.cursor = self.cells.len();
        self.set_selection(0, self.cells.len());
    }

    /// Plain text of the selection, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection_range()?;
        Some(self.cells[range].iter().map(Cell::text).collect())
    }

    /// Clear everything and reset the color sequence cursor.
    pub fn reset(&mut self) {
        let had_content = !self.cells.is_empty();
        self.cells.clear();
        self.cursor = 0;
        self.selection = None;
        self.resolver.reset();
        if had_content {
            self.touch();
        }
        emit_log(LogLevel::Debug, "text buffer reset");
    }

    /// Reset only the color sequence cursor.
    pub fn reset_sequence(&mut self) {
        self.resolver.reset();
    }

    /// Reset, then insert `text` with freshly resolved colors.
    pub fn replace_all(&mut self, text: &str) {
        self.reset();
        self.insert_text(text);
    }

    /// Reset, then replay `items` keeping their colors.
    pub fn replace_all_rich(&mut self, items: &[RichItem]) {
        self.reset();
        self.insert_rich(items);
    }

    /// Give every character cell in `range` an explicit color.
    ///
    /// The range is clamped to the buffer; line breaks are skipped.
    pub fn set_color(&mut self, range: Range<usize>, color: &ColorValue) {
        let len = self.cells.len();
        let end = range.end.min(len);
        let range = range.start.min(end)..end;
        let mut changed = false;
        for cell in &mut self.cells[range] {
            if cell.color().is_some_and(|current| current != color) {
                cell.set_color(color.clone());
                changed = true;
            }
        }
        if changed {
            self.touch();
        }
    }

    /// Recompute every character color from its buffer position.
    ///
    /// Uses [`ColorResolver::resolve_deterministic`], so two recolors with
    /// the same rules always agree, whatever happened in between. After
    /// deletions the result can differ from the colors assigned at insertion
    /// time, which were indexed by the sequence cursor.
    pub fn recolor(&mut self) {
        let len = self.cells.len();
        let mut changed = 0usize;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            let Cell::Char { text, color } = cell else {
                continue;
            };
            let fresh = self.resolver.resolve_deterministic(text, index, len);
            if *color != fresh {
                *color = fresh;
                changed += 1;
            }
        }
        if changed > 0 {
            self.touch();
        }
        emit_log(
            LogLevel::Debug,
            &format!("recolored {len} cells, {changed} changed"),
        );
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
