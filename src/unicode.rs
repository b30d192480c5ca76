//! Grapheme splitting for inserted text.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over extended grapheme clusters in a string.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// True if `s` is exactly one grapheme cluster.
#[must_use]
pub fn is_single_grapheme(s: &str) -> bool {
    let mut iter = s.graphemes(true);
    iter.next().is_some() && iter.next().is_none()
}

/// True for `"\n"`, `"\r\n"` and `"\r"`.
///
/// `"\r\n"` is a single grapheme cluster, so it arrives here as one unit.
#[must_use]
pub fn is_line_break(s: &str) -> bool {
    matches!(s, "\n" | "\r\n" | "\r")
}
