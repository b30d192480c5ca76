//! Property-based tests for pointer hit-testing.

#![allow(clippy::cast_precision_loss)]

use chromatext::{CellBox, HitTester};
use proptest::prelude::*;

/// Cells of varying widths laid out left to right on one line.
fn line_boxes(widths: &[f32]) -> Vec<CellBox> {
    let mut left = 0.0;
    widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let cell = CellBox::new(index, left, 0.0, left + width, 16.0);
            left += width;
            cell
        })
        .collect()
}

/// Cells of varying widths wrapped `per_line` to a visual line, 20 px pitch.
fn wrapped_boxes(widths: &[f32], per_line: usize) -> Vec<CellBox> {
    let mut left = 0.0;
    widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            if index % per_line == 0 {
                left = 0.0;
            }
            let top = (index / per_line) as f32 * 20.0;
            let cell = CellBox::new(index, left, top, left + width, top + 16.0);
            left += width;
            cell
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(400))]

    #[test]
    fn prop_index_within_buffer(
        widths in prop::collection::vec(1.0f32..30.0, 0..40),
        extra in 0usize..5,
        x in -100.0f32..1500.0,
        y in -200.0f32..200.0,
        font in prop::option::of(4.0f32..48.0),
    ) {
        let boxes = line_boxes(&widths);
        let len = boxes.len() + extra;
        let tester = HitTester::with_font_size(font);
        let index = tester.locate(x, y, &boxes, 16.0, len);
        prop_assert!(index <= len);
        prop_assert!(tester.hit(x, y, &boxes, 16.0, len) <= len);
    }

    #[test]
    fn prop_index_monotonic_along_line(
        widths in prop::collection::vec(1.0f32..30.0, 1..40),
        a in -50.0f32..1300.0,
        b in -50.0f32..1300.0,
    ) {
        let boxes = line_boxes(&widths);
        let len = boxes.len();
        let tester = HitTester::new();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(tester.locate(lo, 8.0, &boxes, 16.0, len) <= tester.locate(hi, 8.0, &boxes, 16.0, len));
    }

    #[test]
    fn prop_direct_hit_agrees_with_locate(
        widths in prop::collection::vec(1.0f32..30.0, 1..40),
        pick in any::<prop::sample::Index>(),
        frac in 0.0f32..1.0,
    ) {
        let boxes = line_boxes(&widths);
        let len = boxes.len();
        let cell = boxes[pick.index(len)];
        let x = cell.left + (cell.right - cell.left) * frac;
        let tester = HitTester::new();
        prop_assert_eq!(
            HitTester::direct_hit(&cell, x),
            tester.locate(x, 8.0, &boxes, 16.0, len)
        );
    }

    #[test]
    fn prop_wrapped_left_quarter_hits_cell(
        widths in prop::collection::vec(2.0f32..30.0, 1..60),
        per_line in 1usize..12,
        pick in any::<prop::sample::Index>(),
    ) {
        let boxes = wrapped_boxes(&widths, per_line);
        let len = boxes.len();
        let cell = boxes[pick.index(len)];
        let x = cell.left + (cell.right - cell.left) / 4.0;
        let tester = HitTester::new();
        prop_assert_eq!(tester.locate(x, cell.center_y(), &boxes, 16.0, len), cell.index);
    }

    #[test]
    fn prop_wrapped_past_line_end_inserts_after_last(
        widths in prop::collection::vec(2.0f32..30.0, 1..60),
        per_line in 1usize..12,
        pick in any::<prop::sample::Index>(),
    ) {
        let boxes = wrapped_boxes(&widths, per_line);
        let len = boxes.len();
        let lines = len.div_ceil(per_line);
        let line = pick.index(lines);
        let last = ((line + 1) * per_line).min(len) - 1;
        let end = boxes[last];
        let tester = HitTester::new();
        prop_assert_eq!(
            tester.locate(end.right + 5.0, end.center_y(), &boxes, 16.0, len),
            last + 1
        );
    }
}
