//! Cell buffer, cursor, selection and content export.
//!
//! Key types:
//!
//! - [`TextBuffer`]: ordered cells with cursor, selection and color assignment
//! - [`Selection`]: normalized, never-empty anchor/live pair
//! - [`CursorMove`]: cursor movement requested by the input layer
//! - [`CellExport`]: per-cell record for rasterizers
//!
//! # Examples
//!
//! ```
//! use chromatext::{ColorRules, ColorValue, TextBuffer};
//!
//! let mut buf = TextBuffer::with_rules(ColorRules::new().with_fallback(["red", "blue"]));
//! buf.insert_text("AB");
//! let rich = buf.rich_content();
//! assert_eq!(rich[1].color, Some(ColorValue::from("blue")));
//!
//! // Rich replay keeps colors instead of resolving them again.
//! let mut copy = TextBuffer::new();
//! copy.replace_all_rich(&rich);
//! assert_eq!(copy.rich_content(), rich);
//! ```

mod buffer;
mod export;
mod selection;

pub use buffer::TextBuffer;
pub use export::CellExport;
pub use selection::{CursorMove, Selection};
