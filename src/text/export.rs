//! Plain, rich and detailed views of buffer content for renderers and
//! exporters.

use serde::Serialize;

use crate::cell::{Cell, RichItem};
use crate::color::{ColorValue, Rgba};
use crate::style::CellStyle;
use crate::text::TextBuffer;

/// Everything a rasterizer needs to draw one cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellExport {
    pub index: usize,
    /// Cell text, `"\n"` for line breaks.
    pub text: String,
    pub is_line_break: bool,
    /// Assigned color, `None` for line breaks.
    pub color: Option<ColorValue>,
    /// Parsed color, `None` for line breaks, `transparent` and unparseable colors.
    pub rgb: Option<Rgba>,
    pub style: CellStyle,
}

impl TextBuffer {
    /// Characters in order, line breaks as `"\n"`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.cells().iter().map(Cell::text).collect()
    }

    /// One `(text, color)` item per cell; line breaks are `("\n", None)`.
    #[must_use]
    pub fn rich_content(&self) -> Vec<RichItem> {
        self.cells().iter().map(Cell::to_rich).collect()
    }

    /// Per-cell export with parsed colors and the given box style.
    #[must_use]
    pub fn detailed_export(&self, style: &CellStyle) -> Vec<CellExport> {
        self.cells()
            .iter()
            .enumerate()
            .map(|(index, cell)| CellExport {
                index,
                text: cell.text().to_string(),
                is_line_break: cell.is_line_break(),
                color: cell.color().cloned(),
                rgb: cell.color().and_then(ColorValue::to_rgba),
                style: style.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ColorRules;

    fn sample() -> TextBuffer {
        let mut buf = TextBuffer::with_rules(
            ColorRules::new()
                .with_color_map([("a", "#f00")])
                .with_fallback(["bogus"]),
        );
        buf.insert_text("a\nb");
        buf
    }

    #[test]
    fn test_plain_text() {
        insta::assert_snapshot!(sample().plain_text().replace('\n', "⏎"), @"a⏎b");
    }

    #[test]
    fn test_rich_content() {
        assert_eq!(
            sample().rich_content(),
            vec![
                RichItem::new("a", Some(ColorValue::from("#f00"))),
                RichItem::line_break(),
                RichItem::new("b", Some(ColorValue::from("bogus"))),
            ]
        );
    }

    #[test]
    fn test_detailed_export() {
        let style = CellStyle::default();
        let export = sample().detailed_export(&style);
        assert_eq!(export.len(), 3);

        assert_eq!(export[0].rgb, Some(Rgba::RED));
        assert!(export[1].is_line_break);
        assert_eq!(export[1].text, "\n");
        assert_eq!(export[1].color, None);
        assert_eq!(export[1].rgb, None);
        assert_eq!(export[2].rgb, None);
        assert_eq!(export[2].style, style);
        assert_eq!(export[2].index, 2);
    }

    #[test]
    fn test_detailed_export_json_shape() {
        let export = sample().detailed_export(&CellStyle::default());
        let json = serde_json::to_value(&export[0]).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["text"], "a");
        assert_eq!(json["color"], "#f00");
        assert_eq!(json["rgb"]["r"], 1.0);
        assert_eq!(json["style"]["padding"], 2.0);
        assert!(json["style"]["border_sides"].is_string());
        let json = serde_json::to_value(&export[1]).unwrap();
        assert!(json["rgb"].is_null());
    }
}
