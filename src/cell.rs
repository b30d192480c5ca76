//! Buffer cells: one styled character or one line break.
//!
//! The buffer is a plain ordered `Vec<Cell>`. Cells are value types; a
//! renderer materializes its own visual elements from them and reports
//! geometry back through [`CellBox`](crate::CellBox).
//!
//! # Examples
//!
//! ```
//! use chromatext::{Cell, ColorValue, RichItem};
//!
//! let cell = Cell::char("é", ColorValue::from("#f00"));
//! assert_eq!(cell.text(), "é");
//! assert_eq!(cell.to_rich(), RichItem::new("é", Some(ColorValue::from("#f00"))));
//!
//! assert_eq!(Cell::LineBreak.text(), "\n");
//! assert_eq!(Cell::LineBreak.color(), None);
//! ```

use serde::{Deserialize, Serialize};

use crate::color::ColorValue;

/// Text used for a line break in plain and rich output.
pub const LINE_BREAK: &str = "\n";

/// One unit of buffer content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// A single grapheme cluster with its resolved color.
    Char { text: String, color: ColorValue },
    /// A hard line break.
    LineBreak,
}

impl Cell {
    /// Create a character cell.
    #[must_use]
    pub fn char(text: impl Into<String>, color: ColorValue) -> Self {
        Self::Char {
            text: text.into(),
            color,
        }
    }

    /// Cell text; line breaks render as `"\n"`.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Char { text, .. } => text,
            Self::LineBreak => LINE_BREAK,
        }
    }

    /// Assigned color, `None` for line breaks.
    #[must_use]
    pub fn color(&self) -> Option<&ColorValue> {
        match self {
            Self::Char { color, .. } => Some(color),
            Self::LineBreak => None,
        }
    }

    #[must_use]
    pub fn is_line_break(&self) -> bool {
        matches!(self, Self::LineBreak)
    }

    /// Replace the color of a character cell. Line breaks are left alone.
    pub(crate) fn set_color(&mut self, new_color: ColorValue) {
        if let Self::Char { color, .. } = self {
            *color = new_color;
        }
    }

    #[must_use]
    pub fn to_rich(&self) -> RichItem {
        RichItem {
            text: self.text().to_string(),
            color: self.color().cloned(),
        }
    }
}

/// A `(text, color)` pair used by rich export, rich replay and the clipboard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RichItem {
    pub text: String,
    pub color: Option<ColorValue>,
}

impl RichItem {
    #[must_use]
    pub fn new(text: impl Into<String>, color: Option<ColorValue>) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    /// A line break item: `("\n", None)`.
    #[must_use]
    pub fn line_break() -> Self {
        Self::new(LINE_BREAK, None)
    }

    #[must_use]
    pub fn is_line_break(&self) -> bool {
        crate::unicode::is_line_break(&self.text)
    }
}
