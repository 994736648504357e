//! Glyph segmentation regression test
//!
//! Segments synthetic scans and checks the boxes against the known ink
//! rectangles: an ink glyph on paper comes back as its ink extent plus
//! two pixels (one for the hole border, one for padding).
//!
//! Run with:
//! ```
//! cargo test -p digits-region --test segment_reg
//! ```

use digits_core::{Box, Boxa};
use digits_region::{ContourFilter, SegmentOptions, segment_digits};
use digits_test::{RegParams, synth};

fn sorted(mut boxes: Boxa) -> Boxa {
    boxes.sort_by_position();
    boxes
}

#[test]
fn segment_reg() {
    let mut rp = RegParams::new("segment");
    let defaults = SegmentOptions::default();
    let legacy = SegmentOptions {
        filter: ContourFilter::DropLast,
        ..Default::default()
    };

    // --- Two ink strokes on a light page ---
    let a = Box::new_unchecked(15, 10, 12, 20);
    let b = Box::new_unchecked(45, 12, 10, 25);
    let page = synth::page(80, 50);
    let scan = synth::with_rect(&synth::with_rect(&page, a, synth::INK), b, synth::INK);

    let expected: Boxa = [a.expand(2), b.expand(2)].into_iter().collect();
    let boxes = segment_digits(&scan, &defaults).expect("segment strokes");
    rp.compare_values(2.0, boxes.len() as f64, 0.0);
    rp.compare_boxes(&expected, &sorted(boxes));

    // On a light page the page outline is the last contour, so the
    // legacy rule agrees
    let boxes = segment_digits(&scan, &legacy).expect("segment strokes, legacy");
    rp.compare_boxes(&expected, &sorted(boxes));

    // --- A sheet of digits: one box per glyph ---
    let digits = [0u8, 1, 8];
    let sheet = synth::digit_sheet(&digits, 3);
    let expected: Boxa = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let (x, y) = synth::sheet_cell_origin(i, 3);
            let ink = synth::digit_extent(d, 3);
            Box::new_unchecked(ink.x + x as i32, ink.y + y as i32, ink.w, ink.h).expand(2)
        })
        .collect();
    let boxes = segment_digits(&sheet, &defaults).expect("segment sheet");
    rp.compare_boxes(&expected, &sorted(boxes.clone()));
    rp.write_pix(&sheet, "sheet").expect("write sheet");

    // Every box lies inside the image
    let (w, h) = (sheet.width() as i32, sheet.height() as i32);
    let inside = boxes
        .iter()
        .all(|b| b.x >= 0 && b.y >= 0 && b.right() <= w && b.bottom() <= h);
    rp.compare_values(1.0, inside as u8 as f64, 0.0);

    // --- A blank page has no glyphs ---
    let boxes = segment_digits(&synth::page(60, 40), &defaults).expect("segment blank");
    rp.compare_values(0.0, boxes.len() as f64, 0.0);

    assert!(rp.cleanup(), "segment regression test failed");
}

/// A bright glyph on a dark background is a single outer border. The
/// legacy rule drops it as if it were the page; the border rule keeps it.
#[test]
fn segment_reg_dark_background() {
    let mut rp = RegParams::new("segment_dark");

    let dark = synth::dark_page(50, 40);
    let boxes = segment_digits(&dark, &SegmentOptions::default()).expect("segment dark");
    rp.compare_values(0.0, boxes.len() as f64, 0.0);

    let glyph = Box::new_unchecked(12, 9, 16, 20);
    let scan = synth::with_rect(&dark, glyph, 255);

    let legacy = SegmentOptions {
        filter: ContourFilter::DropLast,
        ..Default::default()
    };
    let boxes = segment_digits(&scan, &legacy).expect("segment legacy");
    rp.compare_values(0.0, boxes.len() as f64, 0.0);

    let boxes = segment_digits(&scan, &SegmentOptions::default()).expect("segment border");
    let expected: Boxa = std::iter::once(glyph.expand(1)).collect();
    rp.compare_boxes(&expected, &boxes);

    assert!(rp.cleanup(), "segment dark background regression test failed");
}

/// The cleanup can be given as an explicit sequence string.
#[test]
fn segment_reg_sequence_override() {
    let mut rp = RegParams::new("segment_sequence");

    let sheet = synth::digit_sheet(&[4, 7], 3);
    let iterated = segment_digits(&sheet, &SegmentOptions::default()).expect("iterated");
    let explicit = SegmentOptions {
        morph_sequence: Some("e11.11 + d11.11".to_string()),
        ..Default::default()
    };
    let single = segment_digits(&sheet, &explicit).expect("explicit");
    rp.compare_boxes(&sorted(iterated), &sorted(single));

    assert!(rp.cleanup(), "segment sequence regression test failed");
}

/// A glyph with a large loop encloses a paper island. The island is an
/// outer border inside the glyph's rectangle and only the legacy rule
/// reports it as a second box.
#[test]
fn segment_reg_ring() {
    let mut rp = RegParams::new("segment_ring");

    let ink = Box::new_unchecked(40, 40, 120, 120);
    let island = Box::new_unchecked(70, 70, 60, 60);
    let scan = synth::with_rect(
        &synth::with_rect(&synth::page(200, 200), ink, synth::INK),
        island,
        synth::PAPER,
    );
    rp.write_pix(&scan, "ring").expect("write ring");

    let boxes = segment_digits(&scan, &SegmentOptions::default()).expect("segment ring");
    let expected: Boxa = std::iter::once(ink.expand(2)).collect();
    rp.compare_values(1.0, boxes.len() as f64, 0.0);
    rp.compare_boxes(&expected, &boxes);

    let legacy = SegmentOptions {
        filter: ContourFilter::DropLast,
        ..Default::default()
    };
    let boxes = segment_digits(&scan, &legacy).expect("segment ring, legacy");
    let expected: Boxa = [ink.expand(2), island.expand(1)].into_iter().collect();
    rp.compare_boxes(&sorted(expected), &sorted(boxes));

    assert!(rp.cleanup(), "segment ring regression test failed");
}
