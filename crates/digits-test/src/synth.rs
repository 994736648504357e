//! Synthetic scans
//!
//! Builders for the light-page / dark-ink images the pipeline expects,
//! so regression tests can run without checked-in scans.

use digits_core::{Box, Pix};

/// Gray level of blank paper (above the 180 threshold)
pub const PAPER: u8 = 235;

/// Gray level of pen ink (below the 180 threshold)
pub const INK: u8 = 30;

/// Glyph cell width in font units
pub const GLYPH_WIDTH: u32 = 5;

/// Glyph cell height in font units
pub const GLYPH_HEIGHT: u32 = 7;

/// Distance from the page edge to the first glyph, in pixels
pub const SHEET_MARGIN: u32 = 16;

/// Horizontal gap between adjacent glyph cells, in pixels
pub const SHEET_GAP: u32 = 16;

/// 5x7 bitmap font, one byte per row, bit 4 is the leftmost column
const FONT: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

/// A blank page of paper.
///
/// # Panics
///
/// Panics on a zero dimension.
pub fn page(width: u32, height: u32) -> Pix {
    Pix::new_filled(width, height, PAPER).expect("valid page size")
}

/// An all-black image.
pub fn dark_page(width: u32, height: u32) -> Pix {
    Pix::new_filled(width, height, 0).expect("valid page size")
}

/// Copy of `pix` with the rectangle `b` painted with `val`.
pub fn with_rect(pix: &Pix, b: Box, val: u8) -> Pix {
    let mut pm = pix.to_mut();
    pm.fill_rect(
        b.x.max(0) as u32,
        b.y.max(0) as u32,
        b.right().max(0) as u32,
        b.bottom().max(0) as u32,
        val,
    );
    pm.into()
}

/// Copy of `pix` with `digit` drawn at `(x, y)`, each font unit
/// `scale x scale` pixels.
///
/// # Panics
///
/// Panics if `digit > 9`.
pub fn with_digit(pix: &Pix, digit: u8, x: u32, y: u32, scale: u32, val: u8) -> Pix {
    let glyph = &FONT[digit as usize];
    let mut pm = pix.to_mut();
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + col * scale;
                let py = y + row as u32 * scale;
                pm.fill_rect(px, py, px + scale, py + scale, val);
            }
        }
    }
    pm.into()
}

/// Ink extent of `digit` drawn at the origin, in pixels.
pub fn digit_extent(digit: u8, scale: u32) -> Box {
    let glyph = &FONT[digit as usize];
    let used = glyph.iter().fold(0u8, |acc, &b| acc | b);
    let first_col = (0..GLYPH_WIDTH)
        .find(|c| used & (1 << (GLYPH_WIDTH - 1 - c)) != 0)
        .unwrap_or(0);
    let last_col = (0..GLYPH_WIDTH)
        .rev()
        .find(|c| used & (1 << (GLYPH_WIDTH - 1 - c)) != 0)
        .unwrap_or(0);
    Box::new_unchecked(
        (first_col * scale) as i32,
        0,
        ((last_col - first_col + 1) * scale) as i32,
        (GLYPH_HEIGHT * scale) as i32,
    )
}

/// Origin of the `index`-th glyph cell on a digit sheet.
pub fn sheet_cell_origin(index: usize, scale: u32) -> (u32, u32) {
    let pitch = GLYPH_WIDTH * scale + SHEET_GAP;
    (SHEET_MARGIN + index as u32 * pitch, SHEET_MARGIN)
}

/// A page with `digits` written left to right in ink.
///
/// With `scale <= 3` the gaps inside each glyph are narrower than the
/// default cleanup closes, so every glyph segments as a single blob.
pub fn digit_sheet(digits: &[u8], scale: u32) -> Pix {
    let n = digits.len() as u32;
    let width = 2 * SHEET_MARGIN + n * GLYPH_WIDTH * scale + n.saturating_sub(1) * SHEET_GAP;
    let height = 2 * SHEET_MARGIN + GLYPH_HEIGHT * scale;
    let mut pix = page(width.max(1), height);
    for (i, &d) in digits.iter().enumerate() {
        let (x, y) = sheet_cell_origin(i, scale);
        pix = with_digit(&pix, d, x, y, scale, INK);
    }
    pix
}
