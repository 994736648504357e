//! From manifest to dataset
//!
//! Decodes every listed scan, segments it into glyphs and appends one
//! feature row per glyph, labeled with the scan's manifest label.

use crate::config::PipelineConfig;
use crate::dataset::Dataset;
use crate::features::FeatureBuilder;
use crate::manifest::{Manifest, ManifestEntry};
use crate::{RecogError, RecogResult};
use digits_core::{Boxa, Pix};
use digits_region::segment_digits;
use log::{debug, info, warn};

/// A segmented scan, as seen by the [`build_dataset_with`] callback
#[derive(Debug)]
pub struct SegmentedScan<'a> {
    /// Position of the entry in the manifest
    pub index: usize,
    /// The manifest entry
    pub entry: &'a ManifestEntry,
    /// The decoded scan
    pub pix: &'a Pix,
    /// Glyph boxes found in the scan
    pub boxes: &'a Boxa,
}

/// Build a dataset from every scan in `manifest`
///
/// # Errors
///
/// Returns [`RecogError::ImageUnreadable`] for the first scan that cannot
/// be read or decoded.
pub fn build_dataset(manifest: &Manifest, config: &PipelineConfig) -> RecogResult<Dataset> {
    build_dataset_with(manifest, config, |_, _| Ok(()))
}

/// [`build_dataset`], calling `inspect` once per scan after segmentation
///
/// `inspect` receives the builder used for the rows, so it can render the
/// same normalized glyphs.
pub fn build_dataset_with<F>(
    manifest: &Manifest,
    config: &PipelineConfig,
    mut inspect: F,
) -> RecogResult<Dataset>
where
    F: FnMut(&SegmentedScan<'_>, &FeatureBuilder) -> RecogResult<()>,
{
    let builder = FeatureBuilder::new(config.features.clone())?;
    let mut dataset = builder.empty_dataset();

    for (index, entry) in manifest.entries.iter().enumerate() {
        let pix = digits_io::read_image(&entry.image_path).map_err(|source| {
            RecogError::ImageUnreadable {
                path: entry.image_path.clone(),
                source,
            }
        })?;
        let boxes = segment_digits(&pix, &config.segment)?;
        debug!(
            "{}: {}x{}, {} glyphs",
            entry.image_path.display(),
            pix.width(),
            pix.height(),
            boxes.len()
        );
        if boxes.is_empty() {
            warn!("{}: no glyphs found", entry.image_path.display());
        }

        inspect(
            &SegmentedScan {
                index,
                entry,
                pix: &pix,
                boxes: &boxes,
            },
            &builder,
        )?;
        builder.append(&mut dataset, &pix, &boxes, entry.label)?;
    }

    info!(
        "{} scans gave {} samples",
        manifest.entries.len(),
        dataset.len()
    );
    Ok(dataset)
}
