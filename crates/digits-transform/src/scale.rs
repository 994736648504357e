//! Image scaling operations
//!
//! Provides three resampling algorithms:
//! - Linear interpolation (the glyph normalizer default)
//! - Sampling (nearest neighbor)
//! - Area mapping (box-filter averaging for downscaling)
//!
//! All of them map destination pixel centres onto the source grid:
//! destination pixel `d` covers source coordinate `(d + 0.5) * s - 0.5`
//! where `s = src_size / dst_size`.

use crate::{TransformError, TransformResult};
use digits_core::Pix;
use serde::Deserialize;

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling (fastest, pixelated results)
    Sampling,
    /// Bilinear interpolation
    #[default]
    Linear,
    /// Area mapping (best for downscaling, anti-aliased)
    AreaMap,
}

/// Scale an image to exactly `width x height` with the given method
pub fn scale_to_size_with(
    pix: &Pix,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Pix> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size must be non-zero, got {}x{}",
            width, height
        )));
    }
    if width == pix.width() && height == pix.height() {
        return Ok(pix.deep_clone());
    }
    let data = match method {
        ScaleMethod::Sampling => sample(pix, width, height),
        ScaleMethod::Linear => linear(pix, width, height),
        ScaleMethod::AreaMap => area_map(pix, width, height),
    };
    Ok(Pix::from_raw(width, height, data)?)
}

/// Source index and weight of the right/lower neighbour for each
/// destination coordinate.
fn linear_taps(src: u32, dst: u32) -> Vec<(usize, f32)> {
    let ratio = src as f32 / dst as f32;
    let last = src as usize - 1;
    (0..dst)
        .map(|d| {
            let f = (d as f32 + 0.5) * ratio - 0.5;
            let i = f.floor();
            let frac = f - i;
            if i < 0.0 {
                (0, 0.0)
            } else if i as usize >= last {
                (last, 0.0)
            } else {
                (i as usize, frac)
            }
        })
        .collect()
}

fn linear(pix: &Pix, width: u32, height: u32) -> Vec<u8> {
    let sw = pix.width() as usize;
    let sh = pix.height() as usize;
    let src = pix.data();
    let xs = linear_taps(pix.width(), width);
    let ys = linear_taps(pix.height(), height);

    let mut out = Vec::with_capacity(width as usize * height as usize);
    for &(y0, fy) in &ys {
        let y1 = (y0 + 1).min(sh - 1);
        for &(x0, fx) in &xs {
            let x1 = (x0 + 1).min(sw - 1);
            let p00 = src[y0 * sw + x0] as f32;
            let p01 = src[y0 * sw + x1] as f32;
            let p10 = src[y1 * sw + x0] as f32;
            let p11 = src[y1 * sw + x1] as f32;
            let top = p00 + (p01 - p00) * fx;
            let bottom = p10 + (p11 - p10) * fx;
            let v = top + (bottom - top) * fy;
            out.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}

fn sample(pix: &Pix, width: u32, height: u32) -> Vec<u8> {
    let sw = pix.width();
    let sh = pix.height();
    let index = |d: u32, src: u32, dst: u32| {
        let s = ((d as f32 + 0.5) * src as f32 / dst as f32).floor() as u32;
        s.min(src - 1)
    };
    let xs: Vec<u32> = (0..width).map(|d| index(d, sw, width)).collect();

    let mut out = Vec::with_capacity(width as usize * height as usize);
    for dy in 0..height {
        let row = pix.row(index(dy, sh, height));
        out.extend(xs.iter().map(|&x| row[x as usize]));
    }
    out
}

/// Overlap of destination cell `d` with each source cell, as
/// `(first_index, weights)`.
fn area_spans(src: u32, dst: u32) -> Vec<(usize, Vec<f32>)> {
    let ratio = src as f64 / dst as f64;
    (0..dst)
        .map(|d| {
            let start = d as f64 * ratio;
            let end = ((d + 1) as f64 * ratio).min(src as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).clamp(first + 1, src as usize);
            let weights = (first..last)
                .map(|i| {
                    let lo = start.max(i as f64);
                    let hi = end.min((i + 1) as f64);
                    (hi - lo).max(0.0) as f32
                })
                .collect();
            (first, weights)
        })
        .collect()
}

fn area_map(pix: &Pix, width: u32, height: u32) -> Vec<u8> {
    let sw = pix.width() as usize;
    let src = pix.data();
    let xs = area_spans(pix.width(), width);
    let ys = area_spans(pix.height(), height);

    let mut out = Vec::with_capacity(width as usize * height as usize);
    for (y0, wy) in &ys {
        for (x0, wx) in &xs {
            let mut sum = 0.0f32;
            let mut area = 0.0f32;
            for (j, &ay) in wy.iter().enumerate() {
                let row = (y0 + j) * sw;
                for (i, &ax) in wx.iter().enumerate() {
                    let a = ax * ay;
                    sum += src[row + x0 + i] as f32 * a;
                    area += a;
                }
            }
            let v = if area > 0.0 { sum / area } else { 0.0 };
            out.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}
