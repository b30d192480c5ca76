//! `chromatext` - per-character colored text editing core
//!
//! A cell buffer where every character carries its own color, assigned on
//! insertion by a chain of color rules and preserved through copy and paste.
//! Pointer coordinates are mapped back to buffer indices from the geometry a
//! renderer reports.

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_precision_loss)] // Index to coordinate casts in tests and benches
#![allow(clippy::module_name_repetitions)] // Allow ColorResolver, CellStyle etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for intents
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod cell;
pub mod clipboard;
pub mod color;
pub mod editor;
pub mod error;
pub mod event;
pub mod hittest;
pub mod resolve;
pub mod style;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use cell::{Cell, LINE_BREAK, RichItem};
pub use clipboard::ClipboardStore;
pub use color::{ColorValue, Rgba};
pub use error::{Error, Result};
pub use event::{
    EditorEvent, ListenerId, Listeners, LogLevel, clear_log_callback, emit_log, set_log_callback,
};
pub use style::{BorderSides, CellStyle, CellStyleBuilder};

// Re-export editing types
pub use editor::{EditIntent, Editor, EditorOptions, LayoutSnapshot};
pub use hittest::{CellBox, HitTester};
pub use resolve::{ColorResolver, ColorRules, ResolveContext, ResolverFn};
pub use text::{CellExport, CursorMove, Selection, TextBuffer};
