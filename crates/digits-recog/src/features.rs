//! Feature vectors from segmented glyphs
//!
//! Each glyph box is cropped out of the scan, binarized again, resized to
//! a fixed grid and flattened row by row into one feature row.

use crate::dataset::{Dataset, NUM_CLASSES, one_hot};
use crate::{RecogError, RecogResult};
use digits_core::{Box, Boxa, Pix};
use digits_transform::{ScaleMethod, scale_to_size_with};
use log::{debug, warn};
use serde::Deserialize;

/// Options for [`FeatureBuilder`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureOptions {
    /// Pixels of the crop strictly brighter than this become 255
    pub threshold: u8,
    /// Width of the feature grid
    pub width: u32,
    /// Height of the feature grid
    pub height: u32,
    /// Resampling used to reach the grid size
    pub method: ScaleMethod,
    /// Scale features to `0.0..=1.0` instead of the raw `0..=255`
    pub normalize: bool,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            threshold: 180,
            width: 15,
            height: 15,
            method: ScaleMethod::Linear,
            normalize: false,
        }
    }
}

impl FeatureOptions {
    /// Check that the grid is not empty
    pub fn validate(&self) -> RecogResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RecogError::InvalidParameter(format!(
                "feature grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Length of one feature row
    pub fn feature_len(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Turns glyph boxes into labeled dataset rows
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    options: FeatureOptions,
}

impl FeatureBuilder {
    /// Create a builder
    ///
    /// # Errors
    ///
    /// Returns an error if the options describe an empty grid.
    pub fn new(options: FeatureOptions) -> RecogResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The builder's options
    pub fn options(&self) -> &FeatureOptions {
        &self.options
    }

    /// An empty dataset shaped for this builder's rows
    pub fn empty_dataset(&self) -> Dataset {
        Dataset::new(self.options.feature_len(), NUM_CLASSES)
    }

    /// The normalized glyph image for one box: cropped, binarized and
    /// resized to the feature grid.
    ///
    /// Returns `None` if the box does not overlap the image.
    pub fn glyph(&self, pix: &Pix, b: &Box) -> RecogResult<Option<Pix>> {
        let crop = match pix.clip_box(b) {
            Ok(crop) => crop,
            Err(digits_core::Error::BoxOutsideImage { .. }) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let binary = crop.threshold_binary(self.options.threshold);
        let resized = scale_to_size_with(
            &binary,
            self.options.width,
            self.options.height,
            self.options.method,
        )?;
        Ok(Some(resized))
    }

    /// Feature row of one normalized glyph image
    pub fn features(&self, glyph: &Pix) -> Vec<f32> {
        let scale = if self.options.normalize {
            1.0 / 255.0
        } else {
            1.0
        };
        glyph.to_f32_vec(scale)
    }

    /// Append one row per box to `dataset`, all labeled `label`
    ///
    /// Boxes outside the image are skipped with a warning. Returns the
    /// number of rows appended.
    pub fn append(
        &self,
        dataset: &mut Dataset,
        pix: &Pix,
        boxes: &Boxa,
        label: u8,
    ) -> RecogResult<usize> {
        if label as usize >= NUM_CLASSES {
            return Err(RecogError::InvalidParameter(format!(
                "label {} is not a digit",
                label
            )));
        }
        let target = one_hot(label as usize, NUM_CLASSES);
        let mut appended = 0;
        for b in boxes {
            let Some(glyph) = self.glyph(pix, b)? else {
                warn!(
                    "box {:?} lies outside the {}x{} scan, skipped",
                    b,
                    pix.width(),
                    pix.height()
                );
                continue;
            };
            dataset.push(&self.features(&glyph), &target)?;
            appended += 1;
        }
        debug!("appended {} rows labeled {}", appended, label);
        Ok(appended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::argmax;

    fn scan() -> Pix {
        // Light page with a dark 6x6 square at (4, 4)
        let mut pm = Pix::new_filled(20, 16, 235).unwrap().to_mut();
        pm.fill_rect(4, 4, 10, 10, 30);
        pm.into()
    }

    #[test]
    fn test_defaults() {
        let opts = FeatureOptions::default();
        assert_eq!(opts.feature_len(), 225);
        assert_eq!(opts.threshold, 180);
        assert!(!opts.normalize);
        let bad = FeatureOptions {
            width: 0,
            ..Default::default()
        };
        assert!(FeatureBuilder::new(bad).is_err());
    }

    #[test]
    fn test_append_rows_and_labels() {
        let builder = FeatureBuilder::new(FeatureOptions::default()).unwrap();
        let mut ds = builder.empty_dataset();
        let boxes: Boxa = [
            Box::new_unchecked(2, 2, 10, 10),
            Box::new_unchecked(0, 0, 20, 16),
        ]
        .into_iter()
        .collect();
        let n = builder.append(&mut ds, &scan(), &boxes, 7).unwrap();
        assert_eq!(n, 2);
        assert_eq!(ds.len(), 2);
        for (features, label) in ds.samples() {
            assert_eq!(features.len(), 225);
            assert_eq!(label.len(), 10);
            assert_eq!(argmax(label), Some(7));
            assert!(features.iter().all(|v| (0.0..=255.0).contains(v)));
        }
    }

    #[test]
    fn test_binarized_glyph() {
        let builder = FeatureBuilder::new(FeatureOptions::default()).unwrap();
        // A box covering exactly the ink gives an all-dark glyph
        let glyph = builder
            .glyph(&scan(), &Box::new_unchecked(4, 4, 6, 6))
            .unwrap()
            .unwrap();
        assert_eq!((glyph.width(), glyph.height()), (15, 15));
        assert!(glyph.data().iter().all(|&v| v == 0));
        // A box on paper only gives an all-bright glyph
        let glyph = builder
            .glyph(&scan(), &Box::new_unchecked(12, 0, 8, 8))
            .unwrap()
            .unwrap();
        assert!(glyph.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_glyph_box_overlap() {
        let builder = FeatureBuilder::new(FeatureOptions::default()).unwrap();
        assert!(
            builder
                .glyph(&scan(), &Box::new_unchecked(40, 40, 5, 5))
                .unwrap()
                .is_none()
        );
        // Overhanging boxes are cropped to the image
        let glyph = builder
            .glyph(&scan(), &Box::new_unchecked(-20, -20, 30, 30))
            .unwrap()
            .unwrap();
        assert_eq!((glyph.width(), glyph.height()), (15, 15));
    }

    #[test]
    fn test_normalize() {
        let opts = FeatureOptions {
            normalize: true,
            ..Default::default()
        };
        let builder = FeatureBuilder::new(opts).unwrap();
        let glyph = builder
            .glyph(&scan(), &Box::new_unchecked(12, 0, 8, 8))
            .unwrap()
            .unwrap();
        assert!(builder.features(&glyph).iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_outside_box_is_skipped() {
        let builder = FeatureBuilder::new(FeatureOptions::default()).unwrap();
        let mut ds = builder.empty_dataset();
        let boxes: Boxa = std::iter::once(Box::new_unchecked(40, 40, 5, 5)).collect();
        let n = builder.append(&mut ds, &scan(), &boxes, 1).unwrap();
        assert_eq!(n, 0);
        assert!(ds.is_empty());
        assert!(builder.append(&mut ds, &scan(), &Boxa::new(), 10).is_err());
    }

    #[test]
    fn test_source_is_not_mutated() {
        let pix = scan();
        let before = pix.data().to_vec();
        let builder = FeatureBuilder::new(FeatureOptions::default()).unwrap();
        let mut ds = builder.empty_dataset();
        let boxes: Boxa = std::iter::once(Box::new_unchecked(3, 3, 8, 8)).collect();
        builder.append(&mut ds, &pix, &boxes, 0).unwrap();
        assert_eq!(pix.data(), &before[..]);
    }
}
