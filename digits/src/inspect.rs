//! Segmentation snapshots
//!
//! For every scan, writes the scan with its glyph boxes outlined and each
//! normalized glyph as a separate PNG, so a human can see what the
//! classifier was fed.

use digits_core::ImageFormat;
use digits_recog::{FeatureBuilder, RecogError, RecogResult, SegmentedScan};
use log::debug;
use std::path::{Path, PathBuf};

/// Gray level of the box outlines
const OUTLINE: u8 = 0;

/// Writes snapshots of segmented scans into one directory
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
    set: String,
}

impl SnapshotWriter {
    /// Snapshots go to `dir`, file names start with `set`
    pub fn new<P: AsRef<Path>>(dir: P, set: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            set: set.to_string(),
        }
    }

    /// `<dir>/<set>-<index>-boxes.png`
    pub fn boxes_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}-{}-boxes.png", self.set, index))
    }

    /// `<dir>/<set>-<index>-<k>.png`
    pub fn glyph_path(&self, index: usize, k: usize) -> PathBuf {
        self.dir.join(format!("{}-{}-{}.png", self.set, index, k))
    }

    /// Write the outlined scan and every glyph of `scan`
    ///
    /// Glyph files are numbered by box position, so a box that falls
    /// outside the scan leaves a gap in the numbering.
    pub fn write(&self, scan: &SegmentedScan<'_>, builder: &FeatureBuilder) -> RecogResult<()> {
        let mut outlined = scan.pix.to_mut();
        outlined.draw_boxa(scan.boxes, 1, OUTLINE)?;
        write_png(&outlined.into(), self.boxes_path(scan.index))?;

        for (k, b) in scan.boxes.iter().enumerate() {
            if let Some(glyph) = builder.glyph(scan.pix, b)? {
                write_png(&glyph, self.glyph_path(scan.index, k))?;
            }
        }
        debug!(
            "{}: wrote {} glyph snapshots to {}",
            scan.entry.image_path.display(),
            scan.boxes.len(),
            self.dir.display()
        );
        Ok(())
    }
}

fn write_png(pix: &digits_core::Pix, path: PathBuf) -> RecogResult<()> {
    digits_io::write_image(pix, &path, ImageFormat::Png)
        .map_err(|source| RecogError::ImageUnwritable { path, source })
}
