//! Binary morphological operations
//!
//! Erosion, dilation, opening and closing for binarized 8-bit images, where
//! foreground is 255 and background is 0.
//!
//! Erosion takes the minimum and dilation the maximum over the structuring
//! element, so the same code is correct for any 8-bit image. Pixels outside
//! the image never contribute: near the edge only the in-bounds part of the
//! element is used. Equivalently, erosion sees the outside as foreground
//! and dilation sees it as background.

use crate::{MorphError, MorphResult, Sel};
use digits_core::Pix;

#[derive(Clone, Copy)]
enum Extremum {
    Min,
    Max,
}

impl Extremum {
    #[inline]
    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            Extremum::Min => a.min(b),
            Extremum::Max => a.max(b),
        }
    }

    /// Identity value: ignored by `pick`
    #[inline]
    fn identity(self) -> u8 {
        match self {
            Extremum::Min => u8::MAX,
            Extremum::Max => u8::MIN,
        }
    }
}

/// Apply a min/max filter with an arbitrary structuring element.
fn rank_filter(pix: &Pix, sel: &Sel, op: Extremum) -> MorphResult<Pix> {
    let w = pix.width() as i32;
    let h = pix.height() as i32;
    let offsets: Vec<(i32, i32)> = sel.hit_offsets().collect();
    if offsets.is_empty() {
        return Err(MorphError::InvalidSel("element has no hits".to_string()));
    }

    let src = pix.data();
    let mut out = pix.to_mut();
    let dst = out.data_mut();
    for y in 0..h {
        for x in 0..w {
            let mut acc = op.identity();
            for &(dx, dy) in &offsets {
                let (sx, sy) = (x + dx, y + dy);
                if sx >= 0 && sx < w && sy >= 0 && sy < h {
                    acc = op.pick(acc, src[(sy * w + sx) as usize]);
                }
            }
            dst[(y * w + x) as usize] = acc;
        }
    }
    Ok(out.into())
}

/// Dilate with a structuring element
///
/// Dilation expands foreground regions: each output pixel is the maximum
/// of the source pixels under the element.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    rank_filter(pix, sel, Extremum::Max)
}

/// Erode with a structuring element
///
/// Erosion shrinks foreground regions: each output pixel is the minimum
/// of the source pixels under the element.
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    rank_filter(pix, sel, Extremum::Min)
}

/// Open an image
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground objects and smooths contours.
pub fn open(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let eroded = erode(pix, sel)?;
    dilate(&eroded, sel)
}

/// Close an image
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and gaps in foreground regions.
pub fn close(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate(pix, sel)?;
    erode(&dilated, sel)
}

fn check_brick(width: u32, height: u32) -> MorphResult<()> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidParameters(format!(
            "brick dimensions must be > 0, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

/// One-dimensional min/max pass over each row (horizontal) or column.
///
/// The window covers `[i - size / 2, i + (size - 1) / 2]`, matching the
/// centred origin of [`Sel::create_brick`].
fn brick_pass(pix: &Pix, size: u32, horizontal: bool, op: Extremum) -> Pix {
    if size == 1 {
        return pix.clone();
    }
    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let before = (size / 2) as usize;
    let after = ((size - 1) / 2) as usize;

    let src = pix.data();
    let mut out = pix.to_mut();
    let dst = out.data_mut();
    let (lines, len) = if horizontal { (h, w) } else { (w, h) };
    let index = |line: usize, i: usize| {
        if horizontal {
            line * w + i
        } else {
            i * w + line
        }
    };
    for line in 0..lines {
        for i in 0..len {
            let lo = i.saturating_sub(before);
            let hi = (i + after).min(len - 1);
            let acc = (lo..=hi).fold(op.identity(), |acc, k| op.pick(acc, src[index(line, k)]));
            dst[index(line, i)] = acc;
        }
    }
    out.into()
}

fn brick_filter(pix: &Pix, width: u32, height: u32, op: Extremum) -> MorphResult<Pix> {
    check_brick(width, height)?;
    let rows = brick_pass(pix, width, true, op);
    Ok(brick_pass(&rows, height, false, op))
}

/// Dilate with a `width x height` brick
///
/// Separable: a horizontal pass followed by a vertical pass, which gives
/// the same result as [`dilate`] with [`Sel::create_brick`].
pub fn dilate_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    brick_filter(pix, width, height, Extremum::Max)
}

/// Erode with a `width x height` brick
///
/// Separable counterpart of [`erode`] with [`Sel::create_brick`].
pub fn erode_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    brick_filter(pix, width, height, Extremum::Min)
}

/// Open with a brick structuring element
pub fn open_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    let eroded = erode_brick(pix, width, height)?;
    dilate_brick(&eroded, width, height)
}

/// Close with a brick structuring element
pub fn close_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    let dilated = dilate_brick(pix, width, height)?;
    erode_brick(&dilated, width, height)
}

/// Erode with a brick `iterations` times
///
/// Zero iterations return the input unchanged.
pub fn erode_brick_iter(pix: &Pix, width: u32, height: u32, iterations: u32) -> MorphResult<Pix> {
    check_brick(width, height)?;
    (0..iterations).try_fold(pix.clone(), |acc, _| erode_brick(&acc, width, height))
}

/// Dilate with a brick `iterations` times
///
/// Zero iterations return the input unchanged.
pub fn dilate_brick_iter(pix: &Pix, width: u32, height: u32, iterations: u32) -> MorphResult<Pix> {
    check_brick(width, height)?;
    (0..iterations).try_fold(pix.clone(), |acc, _| dilate_brick(&acc, width, height))
}
