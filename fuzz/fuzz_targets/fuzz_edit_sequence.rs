//! Fuzz target for editing sequences.
//!
//! Applies arbitrary intents, pointer events and clipboard operations to an
//! editor and checks that cursor and selection stay inside the buffer.

#![no_main]

use arbitrary::Arbitrary;
use chromatext::{CellBox, ColorRules, CursorMove, EditIntent, Editor, LayoutSnapshot};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Action {
    Type(char),
    Text(String),
    LineBreak,
    Backspace,
    Delete,
    Move { delta: i8, extend: bool },
    LineStart,
    LineEnd,
    Select { anchor: u8, live: u8 },
    SelectAll,
    PointerDown { x: i16, y: i16, shift: bool },
    PointerMove { x: i16, y: i16 },
    PointerUp,
    Copy,
    Cut,
    Paste,
    Recolor,
    Reset,
}

/// Lay out non-line-break cells 8 px wide, 20 px per line.
fn layout(editor: &Editor) -> Vec<CellBox> {
    let mut boxes = Vec::new();
    let (mut line, mut column) = (0.0f32, 0.0f32);
    for (index, cell) in editor.buffer().cells().iter().enumerate() {
        if cell.is_line_break() {
            line += 1.0;
            column = 0.0;
            continue;
        }
        let left = column * 8.0;
        let top = line * 20.0;
        boxes.push(CellBox::new(index, left, top, left + 8.0, top + 16.0));
        column += 1.0;
    }
    boxes
}

fuzz_target!(|actions: Vec<Action>| {
    let rules = ColorRules::new()
        .with_color_map([("a", "#f00")])
        .with_palette(["#111", "#222", "#333"]);
    let mut editor = Editor::with_rules(rules);

    for action in actions.into_iter().take(256) {
        match action {
            Action::Type(ch) => editor.apply(EditIntent::InsertChar(ch.to_string())),
            Action::Text(text) => editor.insert_text(&text),
            Action::LineBreak => editor.apply(EditIntent::InsertLineBreak),
            Action::Backspace => editor.apply(EditIntent::DeleteBackward),
            Action::Delete => editor.apply(EditIntent::DeleteForward),
            Action::Move { delta, extend } => editor.apply(EditIntent::MoveCursor {
                movement: CursorMove::By(isize::from(delta)),
                extend,
            }),
            Action::LineStart => editor.move_cursor(CursorMove::LineStart, false),
            Action::LineEnd => editor.move_cursor(CursorMove::LineEnd, true),
            Action::Select { anchor, live } => {
                editor.set_selection(usize::from(anchor), usize::from(live));
            }
            Action::SelectAll => editor.apply(EditIntent::SelectAll),
            Action::PointerDown { x, y, shift } => {
                let boxes = layout(&editor);
                let snapshot = LayoutSnapshot { boxes: &boxes, line_height: 20.0 };
                editor.pointer_down(f32::from(x), f32::from(y), shift, &snapshot);
            }
            Action::PointerMove { x, y } => {
                let boxes = layout(&editor);
                let snapshot = LayoutSnapshot { boxes: &boxes, line_height: 20.0 };
                editor.pointer_move(f32::from(x), f32::from(y), &snapshot);
            }
            Action::PointerUp => editor.pointer_up(),
            Action::Copy => {
                editor.copy();
            }
            Action::Cut => {
                editor.cut();
            }
            Action::Paste => {
                editor.paste();
            }
            Action::Recolor => editor.recolor(),
            Action::Reset => editor.reset(),
        }

        let buffer = editor.buffer();
        assert!(buffer.cursor() <= buffer.len());
        if let Some(range) = buffer.selection_range() {
            assert!(range.start < range.end && range.end <= buffer.len());
        }
    }
});
