//! Editing session: buffer, clipboard, pointer selection and notifications.
//!
//! [`Editor`] is what a host wires to its input layer and renderer. Edit
//! intents and pointer events go in; listeners hear about every completed
//! change, copy and paste, once per operation and in registration order.
//!
//! # Examples
//!
//! ```
//! use chromatext::{ColorRules, CursorMove, EditIntent, Editor};
//!
//! let mut editor = Editor::with_rules(ColorRules::new().with_palette(["#e11", "#1e1"]));
//! editor.insert_text("ABCD");
//!
//! editor.set_selection(1, 3);
//! assert!(editor.copy());
//! editor.apply(EditIntent::MoveCursor { movement: CursorMove::End, extend: false });
//! assert!(editor.paste());
//! assert_eq!(editor.plain_text(), "ABCDBC");
//! ```

use std::ops::Range;

use crate::cell::RichItem;
use crate::clipboard::ClipboardStore;
use crate::color::ColorValue;
use crate::error::Result;
use crate::event::{EditorEvent, ListenerId, Listeners, LogLevel, emit_log};
use crate::hittest::{CellBox, HitTester};
use crate::resolve::ColorRules;
use crate::style::CellStyle;
use crate::text::{CellExport, CursorMove, TextBuffer};

/// Session configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorOptions {
    /// Font size driving the hit-test line tolerance. `None` uses the line
    /// height the renderer passes with each layout.
    pub font_size: Option<f32>,
    /// Box settings reported with the detailed export.
    pub cell_style: CellStyle,
    /// Recolor the whole buffer when the color rules change.
    pub recolor_on_rule_change: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            font_size: None,
            cell_style: CellStyle::default(),
            recolor_on_rule_change: true,
        }
    }
}

impl EditorOptions {
    /// Check that sizes are finite and positive and lengths non-negative.
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = self.font_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(crate::Error::InvalidOption {
                    name: "font_size",
                    reason: format!("expected a finite, positive size, got {size}"),
                });
            }
        }
        self.cell_style.validate()
    }

    /// Replace invalid fields with their defaults, logging each one.
    fn sanitized(mut self) -> Self {
        if let Some(size) = self.font_size {
            if !size.is_finite() || size <= 0.0 {
                emit_log(
                    LogLevel::Warn,
                    &format!("ignoring font_size {size}: expected a finite, positive size"),
                );
                self.font_size = None;
            }
        }
        if let Err(err) = self.cell_style.validate() {
            emit_log(LogLevel::Warn, &format!("{err}; using the default cell style"));
            self.cell_style = CellStyle::default();
        }
        self
    }
}

/// Discrete edit intent delivered by the keyboard/IME layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditIntent {
    InsertChar(String),
    InsertLineBreak,
    DeleteBackward,
    DeleteForward,
    MoveCursor { movement: CursorMove, extend: bool },
    SelectAll,
}

/// Geometry reported by the renderer for the current layout pass.
#[derive(Clone, Copy, Debug)]
pub struct LayoutSnapshot<'a> {
    /// One box per non-line-break cell, in buffer order.
    pub boxes: &'a [CellBox],
    /// Line height used when no font size is configured.
    pub line_height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum PointerState {
    #[default]
    Idle,
    Dragging {
        anchor: usize,
    },
}

/// An editing session over one [`TextBuffer`].
pub struct Editor {
    buffer: TextBuffer,
    clipboard: ClipboardStore,
    options: EditorOptions,
    hit_tester: HitTester,
    pointer: PointerState,
    listeners: Listeners,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an empty session with default options and color rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default(), ColorRules::default())
    }

    /// Create an empty session with the given color rules.
    #[must_use]
    pub fn with_rules(rules: ColorRules) -> Self {
        Self::with_options(EditorOptions::default(), rules)
    }

    /// Create an empty session. Invalid option fields fall back to defaults.
    #[must_use]
    pub fn with_options(options: EditorOptions, rules: ColorRules) -> Self {
        let options = options.sanitized();
        Self {
            buffer: TextBuffer::with_rules(rules),
            clipboard: ClipboardStore::new(),
            hit_tester: HitTester::with_font_size(options.font_size),
            options,
            pointer: PointerState::Idle,
            listeners: Listeners::new(),
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn clipboard(&self) -> &ClipboardStore {
        &self.clipboard
    }

    #[must_use]
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn set_cell_style(&mut self, style: CellStyle) {
        match style.validate() {
            Ok(()) => self.options.cell_style = style,
            Err(err) => emit_log(LogLevel::Warn, &format!("{err}; cell style unchanged")),
        }
    }

    /// Register a notification listener.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(EditorEvent) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Run an arbitrary buffer operation, firing `Change` if it mutated content.
    pub fn edit<R>(&mut self, op: impl FnOnce(&mut TextBuffer) -> R) -> R {
        let before = self.buffer.revision();
        let result = op(&mut self.buffer);
        self.notify_if_changed(before);
        result
    }

    fn notify_if_changed(&mut self, before: u64) -> bool {
        let changed = self.buffer.revision() != before;
        if changed {
            self.listeners.emit(EditorEvent::Change);
        }
        changed
    }

    /// Apply one intent from the input layer.
    pub fn apply(&mut self, intent: EditIntent) {
        match intent {
            EditIntent::InsertChar(text) => self.insert_character(&text),
            EditIntent::InsertLineBreak => self.insert_line_break(),
            EditIntent::DeleteBackward => self.delete_backward(),
            EditIntent::DeleteForward => self.delete_forward(),
            EditIntent::MoveCursor { movement, extend } => self.move_cursor(movement, extend),
            EditIntent::SelectAll => self.select_all(),
        }
    }

    pub fn insert_character(&mut self, text: &str) {
        self.edit(|buf| buf.insert_character(text, None));
    }

    /// Insert with an explicit color instead of a resolved one.
    pub fn insert_colored(&mut self, text: &str, color: ColorValue) {
        self.edit(|buf| buf.insert_character(text, Some(color)));
    }

    pub fn insert_text(&mut self, text: &str) {
        self.edit(|buf| buf.insert_text(text));
    }

    pub fn insert_line_break(&mut self) {
        self.edit(TextBuffer::insert_line_break);
    }

    pub fn delete_backward(&mut self) {
        self.edit(TextBuffer::delete_backward);
    }

    pub fn delete_forward(&mut self) {
        self.edit(TextBuffer::delete_forward);
    }

    /// Delete `[start, end)`. Out-of-range or empty ranges are ignored.
    pub fn delete_range(&mut self, start: usize, end: usize) -> bool {
        self.edit(|buf| buf.delete_range(start, end))
    }

    pub fn move_cursor(&mut self, movement: CursorMove, extend: bool) {
        self.buffer.move_cursor(movement, extend);
    }

    pub fn set_selection(&mut self, anchor: usize, live: usize) {
        self.buffer.set_selection(anchor, live);
    }

    pub fn clear_selection(&mut self) {
        self.buffer.clear_selection();
    }

    pub fn select_all(&mut self) {
        self.buffer.select_all();
    }

    // ------------------------------------------------------------------
    // Pointer selection
    // ------------------------------------------------------------------

    /// Pointer pressed at screen coordinates.
    pub fn pointer_down(&mut self, x: f32, y: f32, shift: bool, layout: &LayoutSnapshot<'_>) {
        let index = self.index_at(x, y, layout);
        self.pointer_down_at(index, shift);
    }

    /// Pointer pressed over a known cell, skipping the geometry scan.
    pub fn pointer_down_on_cell(&mut self, cell: &CellBox, x: f32, shift: bool) {
        self.pointer_down_at(HitTester::direct_hit(cell, x), shift);
    }

    /// Pointer pressed at a known buffer index.
    ///
    /// A plain press collapses the selection at `index` and starts a drag.
    /// A shift press keeps the existing anchor (or anchors at the cursor)
    /// and extends to `index`.
    pub fn pointer_down_at(&mut self, index: usize, shift: bool) {
        let index = index.min(self.buffer.len());
        let anchor = if shift {
            let anchor = self
                .buffer
                .selection()
                .map_or(self.buffer.cursor(), |sel| sel.anchor());
            self.buffer.set_cursor(index);
            self.buffer.set_selection(anchor, index);
            anchor
        } else {
            self.buffer.set_cursor(index);
            index
        };
        self.pointer = PointerState::Dragging { anchor };
    }

    /// Pointer moved. Only extends the selection while dragging.
    pub fn pointer_move(&mut self, x: f32, y: f32, layout: &LayoutSnapshot<'_>) {
        if self.is_dragging() {
            let index = self.index_at(x, y, layout);
            self.pointer_move_to(index);
        }
    }

    /// Pointer moved to a known buffer index.
    pub fn pointer_move_to(&mut self, index: usize) {
        if let PointerState::Dragging { anchor } = self.pointer {
            let index = index.min(self.buffer.len());
            self.buffer.set_cursor(index);
            self.buffer.set_selection(anchor, index);
        }
    }

    /// Pointer released. A drag that never left its anchor selects nothing.
    pub fn pointer_up(&mut self) {
        self.pointer = PointerState::Idle;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.pointer, PointerState::Dragging { .. })
    }

    fn index_at(&self, x: f32, y: f32, layout: &LayoutSnapshot<'_>) -> usize {
        self.hit_tester
            .hit(x, y, layout.boxes, layout.line_height, self.buffer.len())
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Copy the selection. Returns false when nothing is selected.
    pub fn copy(&mut self) -> bool {
        let Some(range) = self.buffer.selection_range() else {
            return false;
        };
        if !self.clipboard.capture(&self.buffer, range) {
            return false;
        }
        self.listeners.emit(EditorEvent::Copy);
        true
    }

    /// Copy the selection, then delete it.
    pub fn cut(&mut self) -> bool {
        if !self.copy() {
            return false;
        }
        self.edit(TextBuffer::delete_selection);
        true
    }

    /// Paste the clipboard at the cursor with its original colors.
    pub fn paste(&mut self) -> bool {
        let before = self.buffer.revision();
        if !self.clipboard.replay_into(&mut self.buffer) {
            return false;
        }
        self.notify_if_changed(before);
        self.listeners.emit(EditorEvent::Paste);
        true
    }

    /// Paste text from an external (system) clipboard.
    ///
    /// Text matching the internal clipboard is replayed with its colors;
    /// anything else is inserted with freshly resolved colors.
    pub fn paste_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        if !self.clipboard.is_empty() && self.clipboard.plain_text() == text {
            return self.paste();
        }
        self.insert_text(text);
        self.listeners.emit(EditorEvent::Paste);
        true
    }

    /// Clipboard text for handing to a system clipboard.
    #[must_use]
    pub fn clipboard_text(&self) -> String {
        self.clipboard.plain_text()
    }

    // ------------------------------------------------------------------
    // Colors
    // ------------------------------------------------------------------

    /// Change the color rules, recoloring the buffer when configured to.
    pub fn update_rules(&mut self, update: impl FnOnce(&mut ColorRules)) {
        update(self.buffer.resolver_mut().rules_mut());
        if self.options.recolor_on_rule_change {
            self.recolor();
        }
    }

    /// Recompute every character color from its position.
    pub fn recolor(&mut self) {
        self.edit(TextBuffer::recolor);
    }

    /// Give a range of cells an explicit color.
    pub fn set_color(&mut self, range: Range<usize>, color: &ColorValue) {
        self.edit(|buf| buf.set_color(range, color));
    }

    /// Reset only the color sequence cursor.
    pub fn reset_sequence(&mut self) {
        self.buffer.reset_sequence();
    }

    // ------------------------------------------------------------------
    // Whole-buffer operations and export
    // ------------------------------------------------------------------

    pub fn reset(&mut self) {
        self.pointer = PointerState::Idle;
        self.edit(TextBuffer::reset);
    }

    pub fn replace_all(&mut self, text: &str) {
        self.pointer = PointerState::Idle;
        self.edit(|buf| buf.replace_all(text));
    }

    pub fn replace_all_rich(&mut self, items: &[RichItem]) {
        self.pointer = PointerState::Idle;
        self.edit(|buf| buf.replace_all_rich(items));
    }

    #[must_use]
    pub fn plain_text(&self) -> String {
        self.buffer.plain_text()
    }

    #[must_use]
    pub fn rich_content(&self) -> Vec<RichItem> {
        self.buffer.rich_content()
    }

    /// Per-cell export using the session's cell style.
    #[must_use]
    pub fn detailed_export(&self) -> Vec<CellExport> {
        self.buffer.detailed_export(&self.options.cell_style)
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("buffer", &self.buffer)
            .field("clipboard", &self.clipboard)
            .field("options", &self.options)
            .field("pointer", &self.pointer)
            .field("listeners", &self.listeners)
            .finish()
    }
}
