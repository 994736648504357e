//! Training and test manifests
//!
//! A manifest is a text file with one scan per line: a single label digit,
//! one separator character, then the image path.
//!
//! ```text
//! 3 scans/three_a.png
//! 7 scans/seven.png
//! ```
//!
//! Parsing is positional: the separator is not checked and the path runs
//! to the end of the line, spaces included.

use crate::{RecogError, RecogResult};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One manifest line: a scan and the digit every glyph in it shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Digit in `0..=9`
    pub label: u8,
    /// Scan path, used as written
    pub image_path: PathBuf,
}

/// Reason a manifest line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestLineError {
    /// The line has no path after the label and separator
    #[error("line too short: expected '<digit><separator><path>'")]
    MissingPath,

    /// The first character is not an ASCII digit
    #[error("label '{0}' is not a digit")]
    InvalidLabel(char),

    /// The line is not valid UTF-8
    #[error("line is not valid UTF-8")]
    NotUtf8,
}

/// Parse one manifest line
///
/// A trailing `\r` is ignored, so files with CRLF line endings parse the
/// same way as LF files.
pub fn parse_line(line: &str) -> Result<ManifestEntry, ManifestLineError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut chars = line.chars();
    let label = chars.next().ok_or(ManifestLineError::MissingPath)?;
    let label = label
        .to_digit(10)
        .ok_or(ManifestLineError::InvalidLabel(label))?;
    // Separator
    chars.next().ok_or(ManifestLineError::MissingPath)?;
    let path = chars.as_str();
    if path.is_empty() {
        return Err(ManifestLineError::MissingPath);
    }
    Ok(ManifestEntry {
        label: label as u8,
        image_path: PathBuf::from(path),
    })
}

/// A parsed manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Accepted entries, in file order
    pub entries: Vec<ManifestEntry>,
    /// Number of rejected lines
    pub skipped: usize,
}

impl Manifest {
    /// Parse manifest lines from a reader
    ///
    /// Blank lines are ignored. Rejected lines, including lines that are
    /// not valid UTF-8, are logged and counted in [`Manifest::skipped`].
    /// Only a failing reader is an error.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut manifest = Manifest::default();
        for (index, raw) in reader.split(b'\n').enumerate() {
            let raw = raw?;
            let parsed = match std::str::from_utf8(&raw) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => parse_line(line),
                Err(_) => Err(ManifestLineError::NotUtf8),
            };
            match parsed {
                Ok(entry) => manifest.entries.push(entry),
                Err(e) => {
                    warn!(
                        "manifest line {}: {} ({:?})",
                        index + 1,
                        e,
                        String::from_utf8_lossy(&raw)
                    );
                    manifest.skipped += 1;
                }
            }
        }
        Ok(manifest)
    }

    /// Number of accepted entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entry was accepted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load a manifest file
///
/// # Errors
///
/// Returns [`RecogError::ManifestUnreadable`] if the file cannot be opened
/// or read.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> RecogResult<Manifest> {
    let path = path.as_ref();
    let unreadable = |source| RecogError::ManifestUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unreadable)?;
    let manifest = Manifest::from_reader(BufReader::new(file)).map_err(unreadable)?;
    debug!(
        "{}: {} entries, {} skipped",
        path.display(),
        manifest.len(),
        manifest.skipped
    );
    Ok(manifest)
}
