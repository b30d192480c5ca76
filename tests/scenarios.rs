//! End-to-end editing scenarios.
//!
//! Run with:
//!   cargo test --test scenarios -- --nocapture
//! With logging:
//!   `RUST_LOG=debug` cargo test --test scenarios -- --nocapture

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Mutex, OnceLock};

use chromatext::{
    CellBox, CellStyle, ColorRules, ColorValue, CursorMove, EditIntent, Editor, EditorEvent,
    EditorOptions, Error, HitTester, LayoutSnapshot, LogLevel, RichItem, Rgba, set_log_callback,
};
use tracing::{Level, debug, info, span, warn};

fn captured_logs() -> &'static Mutex<Vec<(LogLevel, String)>> {
    static LOGS: OnceLock<Mutex<Vec<(LogLevel, String)>>> = OnceLock::new();
    LOGS.get_or_init(|| Mutex::new(Vec::new()))
}

/// Install a tracing subscriber and route the crate's log callback into it.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
    set_log_callback(|level, message| {
        match level {
            LogLevel::Debug => debug!(target: "chromatext", "{message}"),
            LogLevel::Info => info!(target: "chromatext", "{message}"),
            LogLevel::Warn | LogLevel::Error => warn!(target: "chromatext", "{message}"),
        }
        if let Ok(mut logs) = captured_logs().lock() {
            logs.push((level, message.to_string()));
        }
    });
}

fn logged(level: LogLevel, needle: &str) -> bool {
    captured_logs()
        .lock()
        .map(|logs| logs.iter().any(|(l, m)| *l == level && m.contains(needle)))
        .unwrap_or(false)
}

fn colors(editor: &Editor) -> Vec<(String, Option<String>)> {
    editor
        .rich_content()
        .into_iter()
        .map(|item| (item.text, item.color.map(|c| c.as_str().to_string())))
        .collect()
}

fn pair(text: &str, color: &str) -> (String, Option<String>) {
    (text.to_string(), Some(color.to_string()))
}

#[test]
fn scenario_a_fallback_palette_cycles() {
    init_logging();
    let span = span!(Level::INFO, "scenario_a");
    let _enter = span.enter();

    let mut editor = Editor::with_rules(ColorRules::new().with_fallback(["red", "blue"]));
    editor.insert_text("AB");

    assert_eq!(colors(&editor), vec![pair("A", "red"), pair("B", "blue")]);
    assert_eq!(editor.buffer().cursor(), 2);
}

#[test]
fn scenario_b_delete_selected_range() {
    init_logging();
    let mut editor = Editor::new();
    editor.insert_text("ABCD");
    editor.set_selection(1, 3);
    let range = editor.buffer().selection_range().unwrap();
    assert_eq!(editor.buffer().selected_text().as_deref(), Some("BC"));

    assert!(editor.delete_range(range.start, range.end));
    assert_eq!(editor.plain_text(), "AD");
    assert_eq!(editor.buffer().cursor(), 1);
    assert_eq!(editor.buffer().selection(), None);
}

#[test]
fn scenario_c_paste_restores_original_colors() {
    init_logging();
    let rules = ColorRules::new().with_palette(["#100", "#200", "#300", "#400", "#500", "#600"]);
    let mut editor = Editor::with_rules(rules);
    editor.insert_text("ABCD");
    let original = colors(&editor);

    editor.set_selection(1, 3);
    assert!(editor.cut());
    assert_eq!(editor.plain_text(), "AD");
    assert!(editor.paste());
    assert_eq!(colors(&editor), original);

    // Pasting again elsewhere still carries the captured colors.
    editor.move_cursor(CursorMove::End, false);
    assert!(editor.paste());
    assert_eq!(editor.plain_text(), "ABCDBC");
    let after = colors(&editor);
    assert_eq!(after[4], pair("B", "#200"));
    assert_eq!(after[5], pair("C", "#300"));
    // Resolution resumes from where typing left it.
    editor.insert_character("E");
    assert_eq!(colors(&editor)[6], pair("E", "#500"));
}

#[test]
fn scenario_d_hit_test_single_line() {
    init_logging();
    let boxes = [
        CellBox::new(0, 0.0, 0.0, 10.0, 16.0),
        CellBox::new(1, 10.0, 0.0, 20.0, 16.0),
    ];
    let tester = HitTester::new();
    assert_eq!(tester.locate(5.0, 8.0, &boxes, 16.0, 2), 0);
    assert_eq!(tester.locate(15.0, 8.0, &boxes, 16.0, 2), 1);
    assert_eq!(tester.locate(25.0, 8.0, &boxes, 16.0, 2), 2);
}

#[test]
fn scenario_e_map_hits_advance_sequence() {
    init_logging();
    let rules = ColorRules::new()
        .with_color_map([("a", "red")])
        .with_fallback(["green"]);
    let mut editor = Editor::with_rules(rules);
    editor.insert_text("ab");

    assert_eq!(colors(&editor), vec![pair("a", "red"), pair("b", "green")]);
    assert_eq!(editor.buffer().resolver().sequence(), 2);
}

#[test]
fn recolor_after_deletion_uses_positions() {
    init_logging();
    let mut editor = Editor::with_rules(ColorRules::new().with_palette(["p0", "p1", "p2"]));
    editor.insert_text("abc");
    editor.move_cursor(CursorMove::Start, false);
    editor.apply(EditIntent::DeleteForward);
    // Insertion colors survive the deletion.
    assert_eq!(colors(&editor), vec![pair("b", "p1"), pair("c", "p2")]);

    editor.recolor();
    assert_eq!(colors(&editor), vec![pair("b", "p0"), pair("c", "p1")]);
    assert!(logged(LogLevel::Debug, "recolored"));
}

#[test]
fn drag_select_then_type_replaces_selection() {
    init_logging();
    let mut editor = Editor::with_rules(ColorRules::new().with_fallback(["#0f0"]));
    editor.insert_text("hello\nworld");

    // One box per character cell; the line break at index 5 has none.
    let mut boxes = Vec::new();
    for (index, item) in editor.rich_content().iter().enumerate() {
        if item.is_line_break() {
            continue;
        }
        let (line, column) = if index < 5 { (0, index) } else { (1, index - 6) };
        let left = column as f32 * 8.0;
        let top = line as f32 * 20.0;
        boxes.push(CellBox::new(index, left, top, left + 8.0, top + 16.0));
    }
    let layout = LayoutSnapshot {
        boxes: &boxes,
        line_height: 20.0,
    };

    // Press in the right half of 'e', drag past the end of "wor".
    editor.pointer_down(13.0, 8.0, false, &layout);
    editor.pointer_move(22.0, 28.0, &layout);
    editor.pointer_up();
    assert_eq!(editor.buffer().selected_text().as_deref(), Some("llo\nwor"));

    editor.apply(EditIntent::InsertChar("y".into()));
    assert_eq!(editor.plain_text(), "heyld");
}

#[test]
fn notifications_follow_operation_order() {
    init_logging();
    let mut editor = Editor::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let id = editor.subscribe(move |event| sink.borrow_mut().push(event));

    editor.insert_text("abc");
    editor.apply(EditIntent::SelectAll);
    editor.copy();
    editor.cut();
    editor.paste();
    assert_eq!(
        *events.borrow(),
        vec![
            EditorEvent::Change,
            EditorEvent::Copy,
            EditorEvent::Copy,
            EditorEvent::Change,
            EditorEvent::Change,
            EditorEvent::Paste,
        ]
    );

    assert!(editor.unsubscribe(id));
    editor.insert_text("d");
    assert_eq!(events.borrow().len(), 6);
}

#[test]
fn failing_custom_resolver_is_logged_and_skipped() {
    init_logging();
    let rules = ColorRules::new()
        .with_custom(|ctx| {
            if ctx.text == "!" {
                Err(Error::Resolver("no color for bang".into()))
            } else {
                Ok(None)
            }
        })
        .with_fallback(["gray"]);
    let mut editor = Editor::with_rules(rules);
    editor.insert_character("!");

    assert_eq!(colors(&editor), vec![pair("!", "gray")]);
    assert!(logged(LogLevel::Warn, "no color for bang"));
}

#[test]
fn rejected_options_fall_back_with_warning() {
    init_logging();
    let options = EditorOptions {
        font_size: Some(-4.0),
        ..EditorOptions::default()
    };
    let editor = Editor::with_options(options, ColorRules::default());
    assert_eq!(editor.options().font_size, None);
    assert!(logged(LogLevel::Warn, "font_size"));
}

#[test]
fn rich_import_and_detailed_export() {
    init_logging();
    let mut editor = Editor::with_rules(ColorRules::new().with_fallback(["#00f"]));
    editor.replace_all_rich(&[
        RichItem::new("x", Some(ColorValue::from("#f00"))),
        RichItem::line_break(),
        RichItem::new("y", None),
    ]);
    editor.set_cell_style(CellStyle::builder().padding(3.0).build());

    let export = editor.detailed_export();
    assert_eq!(export.len(), 3);
    assert_eq!(export[0].rgb, Some(Rgba::RED));
    assert!(export[1].is_line_break);
    assert_eq!(export[2].color, Some(ColorValue::from("#00f")));
    assert_eq!(export[2].rgb, Some(Rgba::BLUE));
    assert_eq!(export[2].style.padding, 3.0);
}
