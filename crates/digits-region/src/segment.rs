//! Glyph segmentation
//!
//! Turns a grayscale scan into one bounding box per connected glyph:
//! binarize, clean up with erosions and dilations, follow every border,
//! filter the borders and pad their bounding rectangles.
//!
//! Scans are dark ink on light paper, so after thresholding the paper is
//! the foreground. Each glyph is then the hole of a hole border, and the
//! page itself is one outer border that touches the image edge. Paper
//! enclosed by a loop (the inside of a `0`) is another outer border
//! nested in its glyph's rectangle.

use crate::contour::{ChainApprox, Contour, find_contours};
use crate::{RegionError, RegionResult};
use digits_core::{Box, Boxa, Pix};
use digits_morph::{MorphSequence, cleanup_sequence};
use log::debug;
use serde::Deserialize;

/// Rule deciding which traced borders become glyph boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContourFilter {
    /// Keep every border except the last one in retrieval order.
    ///
    /// On a light page the last border is the page outline. On a dark
    /// page it is a real glyph, which is then lost.
    DropLast,
    /// Drop every border whose bounding rectangle reaches the image edge,
    /// then every border whose rectangle lies inside another kept one.
    ///
    /// A glyph that encloses another within its rectangle loses the
    /// inner one.
    #[default]
    BorderTouching,
}

/// Options for [`segment_digits`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentOptions {
    /// Pixels strictly brighter than this become foreground
    pub threshold: u8,
    /// Number of erosions with a `kernel_size` square brick
    pub erode_iterations: u32,
    /// Number of dilations with a `kernel_size` square brick
    pub dilate_iterations: u32,
    /// Side of the square brick used for cleanup
    pub kernel_size: u32,
    /// Explicit cleanup sequence such as `"e3.3 + d3.3"`.
    ///
    /// When set it replaces the erode/dilate iterations.
    pub morph_sequence: Option<String>,
    /// Which borders to keep
    pub filter: ContourFilter,
    /// Borders whose bounding rectangle is smaller than this are dropped
    pub min_area: u32,
    /// Margin added on each side of a kept bounding rectangle, at most
    /// [`MAX_PADDING`]
    pub padding: u32,
}

/// Largest accepted [`SegmentOptions::padding`]
pub const MAX_PADDING: u32 = 1 << 16;

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            threshold: 180,
            erode_iterations: 5,
            dilate_iterations: 5,
            kernel_size: 3,
            morph_sequence: None,
            filter: ContourFilter::default(),
            min_area: 0,
            padding: 1,
        }
    }
}

impl SegmentOptions {
    /// Check the options and build the cleanup sequence they describe.
    ///
    /// Returns `None` when no cleanup is configured.
    pub fn cleanup(&self) -> RegionResult<Option<MorphSequence>> {
        if let Some(seq) = &self.morph_sequence {
            return Ok(Some(MorphSequence::parse(seq)?));
        }
        if self.kernel_size == 0 {
            return Err(RegionError::InvalidParameters(
                "kernel_size must be > 0".to_string(),
            ));
        }
        Ok(cleanup_sequence(
            self.erode_iterations,
            self.dilate_iterations,
            self.kernel_size,
        )?)
    }

    /// The padding as a signed margin for [`Box::expand`]
    pub fn margin(&self) -> RegionResult<i32> {
        match i32::try_from(self.padding) {
            Ok(m) if self.padding <= MAX_PADDING => Ok(m),
            _ => Err(RegionError::InvalidParameters(format!(
                "padding must be <= {}, got {}",
                MAX_PADDING, self.padding
            ))),
        }
    }

    /// Validate the options without running anything
    pub fn validate(&self) -> RegionResult<()> {
        self.margin()?;
        self.cleanup().map(|_| ())
    }
}

/// Find one bounding box per glyph in a grayscale scan
///
/// Boxes are returned in contour retrieval order, padded by
/// `options.padding` and clamped to the image. A scan with no glyphs
/// gives an empty [`Boxa`].
///
/// # Arguments
/// * `pix` - Grayscale scan, dark ink on light paper
/// * `options` - Threshold, cleanup, filter and padding settings
pub fn segment_digits(pix: &Pix, options: &SegmentOptions) -> RegionResult<Boxa> {
    let margin = options.margin()?;
    let cleanup = options.cleanup()?;
    let binary = pix.threshold_binary(options.threshold);
    let cleaned = match &cleanup {
        Some(seq) => seq.apply(&binary)?,
        None => binary,
    };

    let contours = find_contours(&cleaned, ChainApprox::Simple);
    debug!(
        "{}x{} scan: {} contours after cleanup '{}'",
        pix.width(),
        pix.height(),
        contours.len(),
        cleanup.as_ref().map(|s| s.to_string()).unwrap_or_default()
    );

    let width = pix.width() as i32;
    let height = pix.height() as i32;
    let kept = select_contours(&contours, options.filter, width, height);

    let mut boxes = Boxa::with_capacity(kept.len());
    for rect in kept {
        if rect.area() < options.min_area as i64 {
            debug!("dropping {:?}: area below {}", rect, options.min_area);
            continue;
        }
        match rect.expand(margin).clip(width, height) {
            Some(b) => boxes.push(b),
            None => debug!("dropping {:?}: empty after clamping", rect),
        }
    }
    debug!("{} glyph boxes", boxes.len());
    Ok(boxes)
}

/// Bounding rectangles of the contours that pass `filter`
fn select_contours(
    contours: &[Contour],
    filter: ContourFilter,
    width: i32,
    height: i32,
) -> Vec<Box> {
    let rects = contours.iter().filter_map(Contour::bounding_box);
    match filter {
        ContourFilter::DropLast => {
            let mut rects: Vec<Box> = rects.collect();
            rects.pop();
            rects
        }
        ContourFilter::BorderTouching => {
            let inner: Vec<Box> = rects
                .filter(|r| !r.touches_border(width, height))
                .collect();
            inner
                .iter()
                .filter(|r| !inner.iter().any(|o| o != *r && o.contains(r)))
                .copied()
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_with_bright_rect(width: u32, height: u32, rect: Box) -> Pix {
        let mut pm = Pix::new(width, height).unwrap().to_mut();
        pm.fill_rect(
            rect.x as u32,
            rect.y as u32,
            rect.right() as u32,
            rect.bottom() as u32,
            255,
        );
        pm.into()
    }

    #[test]
    fn test_defaults() {
        let opts = SegmentOptions::default();
        assert_eq!(opts.threshold, 180);
        assert_eq!((opts.erode_iterations, opts.dilate_iterations), (5, 5));
        assert_eq!(opts.kernel_size, 3);
        assert_eq!(opts.padding, 1);
        assert_eq!(opts.filter, ContourFilter::BorderTouching);
        assert_eq!(opts.cleanup().unwrap().unwrap().ops().len(), 10);
    }

    #[test]
    fn test_invalid_options() {
        let opts = SegmentOptions {
            kernel_size: 0,
            ..Default::default()
        };
        assert!(opts.validate().is_err());

        let opts = SegmentOptions {
            morph_sequence: Some("q3.3".to_string()),
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn test_padding_bound() {
        let opts = SegmentOptions {
            padding: 1_500_000_000,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
        let pix = dark_with_bright_rect(40, 32, Box::new_unchecked(10, 8, 14, 16));
        assert!(segment_digits(&pix, &opts).is_err());

        let opts = SegmentOptions {
            padding: MAX_PADDING,
            ..Default::default()
        };
        assert_eq!(opts.margin().unwrap(), 1 << 16);
        let boxes = segment_digits(&pix, &opts).unwrap();
        assert_eq!(boxes.boxes(), &[Box::new_unchecked(0, 0, 40, 32)]);
    }

    #[test]
    fn test_nested_border_dropped() {
        // Bright ring with a dark centre on a dark page
        let mut pm = Pix::new(40, 40).unwrap().to_mut();
        pm.fill_rect(8, 8, 32, 32, 255);
        pm.fill_rect(16, 16, 24, 24, 0);
        let pix: Pix = pm.into();
        let opts = SegmentOptions {
            erode_iterations: 0,
            dilate_iterations: 0,
            padding: 0,
            ..Default::default()
        };
        let boxes = segment_digits(&pix, &opts).unwrap();
        assert_eq!(boxes.boxes(), &[Box::new_unchecked(8, 8, 24, 24)]);
    }

    #[test]
    fn test_all_dark_gives_no_boxes() {
        let pix = Pix::new(40, 30).unwrap();
        let boxes = segment_digits(&pix, &SegmentOptions::default()).unwrap();
        assert!(boxes.is_empty());
    }

    #[test]
    fn test_single_bright_glyph_filters() {
        let rect = Box::new_unchecked(10, 8, 14, 16);
        let pix = dark_with_bright_rect(40, 32, rect);

        let legacy = SegmentOptions {
            filter: ContourFilter::DropLast,
            ..Default::default()
        };
        assert!(segment_digits(&pix, &legacy).unwrap().is_empty());

        let boxes = segment_digits(&pix, &SegmentOptions::default()).unwrap();
        assert_eq!(boxes.boxes(), &[rect.expand(1)]);
    }

    #[test]
    fn test_padding_is_clamped() {
        // Rectangle one pixel away from the corner; no cleanup
        let rect = Box::new_unchecked(1, 1, 4, 3);
        let pix = dark_with_bright_rect(10, 8, rect);
        let opts = SegmentOptions {
            erode_iterations: 0,
            dilate_iterations: 0,
            padding: 3,
            ..Default::default()
        };
        let boxes = segment_digits(&pix, &opts).unwrap();
        assert_eq!(boxes.boxes(), &[Box::new_unchecked(0, 0, 8, 7)]);
    }

    #[test]
    fn test_min_area() {
        let mut pm = Pix::new(30, 20).unwrap().to_mut();
        pm.fill_rect(2, 2, 4, 4, 255);
        pm.fill_rect(10, 5, 20, 15, 255);
        let pix: Pix = pm.into();
        let opts = SegmentOptions {
            erode_iterations: 0,
            dilate_iterations: 0,
            min_area: 5,
            padding: 0,
            ..Default::default()
        };
        let boxes = segment_digits(&pix, &opts).unwrap();
        assert_eq!(boxes.boxes(), &[Box::new_unchecked(10, 5, 10, 10)]);
    }
}
