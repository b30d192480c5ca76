//! Pointer hit testing against renderer-supplied cell geometry.
//!
//! The renderer lays cells out in buffer order but wraps them onto several
//! visual lines, so a document-order scan misplaces clicks on wrapped lines.
//! [`HitTester::locate`] works in two stages instead:
//!
//! 1. pick the visual line whose cells are vertically nearest the pointer
//!    (a tolerance band around the nearest cell's center, which absorbs
//!    sub-pixel layout jitter)
//! 2. scan that line's cells left to right and insert before the first cell
//!    whose center is at or right of the pointer, or after the line's last
//!    cell
//!
//! Geometry is only valid for the layout pass it came from; the renderer must
//! supply fresh boxes after every mutation.
//!
//! # Examples
//!
//! ```
//! use chromatext::{CellBox, HitTester};
//!
//! let boxes = [
//!     CellBox::new(0, 0.0, 0.0, 10.0, 16.0),
//!     CellBox::new(1, 10.0, 0.0, 20.0, 16.0),
//! ];
//! let tester = HitTester::new();
//! assert_eq!(tester.locate(5.0, 8.0, &boxes, 16.0, 2), 0);
//! assert_eq!(tester.locate(15.0, 8.0, &boxes, 16.0, 2), 1);
//! assert_eq!(tester.locate(25.0, 8.0, &boxes, 16.0, 2), 2);
//! ```

/// Bounding box of one rendered character cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellBox {
    /// Buffer index of the cell (line breaks have no box, so this is not
    /// the position in the box slice).
    pub index: usize,
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl CellBox {
    #[must_use]
    pub const fn new(index: usize, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            index,
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Point containment, inclusive on the left/top edges only.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Maps pointer coordinates to buffer insertion indices.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitTester {
    font_size: Option<f32>,
}

impl HitTester {
    /// Smallest vertical tolerance, in renderer units.
    pub const MIN_LINE_TOLERANCE: f32 = 8.0;
    /// Tolerance as a fraction of the font size.
    pub const LINE_TOLERANCE_FACTOR: f32 = 0.8;

    /// Hit tester that takes its size from the fallback line height.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit tester with a known font size.
    #[must_use]
    pub fn with_font_size(font_size: Option<f32>) -> Self {
        Self { font_size }
    }

    /// Vertical distance within which two cells count as the same line.
    #[must_use]
    pub fn line_tolerance(&self, fallback_line_height: f32) -> f32 {
        let size = self
            .font_size
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(fallback_line_height);
        // NaN.max(x) is x, so a bogus fallback still yields the minimum.
        (Self::LINE_TOLERANCE_FACTOR * size).max(Self::MIN_LINE_TOLERANCE)
    }

    /// Insertion index for a pointer position.
    ///
    /// `boxes` holds one box per non-line-break cell, in buffer order.
    /// The result is always within `[0, buffer_len]`.
    #[must_use]
    pub fn locate(
        &self,
        x: f32,
        y: f32,
        boxes: &[CellBox],
        fallback_line_height: f32,
        buffer_len: usize,
    ) -> usize {
        if buffer_len == 0 {
            return 0;
        }
        // min_by keeps the first of equal elements.
        let Some(nearest) = boxes
            .iter()
            .min_by(|a, b| (a.center_y() - y).abs().total_cmp(&(b.center_y() - y).abs()))
        else {
            return buffer_len;
        };

        let line_y = nearest.center_y();
        let tolerance = self.line_tolerance(fallback_line_height);
        let mut line: Vec<&CellBox> = boxes
            .iter()
            .filter(|b| (b.center_y() - line_y).abs() <= tolerance)
            .collect();
        line.sort_by(|a, b| a.left.total_cmp(&b.left));

        let index = match line.iter().find(|b| x <= b.center_x()) {
            Some(cell) => cell.index,
            None => line
                .last()
                .map_or(nearest.index, |last| last.index)
                .saturating_add(1),
        };
        index.min(buffer_len)
    }

    /// Fast path when the pointer target is a known cell: before it when the
    /// pointer is on its left half, after it otherwise.
    #[must_use]
    pub fn direct_hit(cell: &CellBox, x: f32) -> usize {
        if x <= cell.center_x() {
            cell.index
        } else {
            cell.index.saturating_add(1)
        }
    }

    /// The first box containing the point.
    #[must_use]
    pub fn cell_at(x: f32, y: f32, boxes: &[CellBox]) -> Option<&CellBox> {
        boxes.iter().find(|b| b.contains(x, y))
    }

    /// Direct hit when the pointer is over a cell, full [`locate`](Self::locate)
    /// otherwise.
    #[must_use]
    pub fn hit(
        &self,
        x: f32,
        y: f32,
        boxes: &[CellBox],
        fallback_line_height: f32,
        buffer_len: usize,
    ) -> usize {
        match Self::cell_at(x, y, boxes) {
            Some(cell) => Self::direct_hit(cell, x).min(buffer_len),
            None => self.locate(x, y, boxes, fallback_line_height, buffer_len),
        }
    }
}
