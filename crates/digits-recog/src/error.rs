//! Error types for digits-recog

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building datasets, training or evaluating
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] digits_core::Error),

    /// Segmentation error
    #[error("region error: {0}")]
    Region(#[from] digits_region::RegionError),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] digits_transform::TransformError),

    /// The manifest file could not be opened or read
    #[error("cannot read manifest {}: {source}", path.display())]
    ManifestUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A scan listed in a manifest could not be read or decoded
    #[error("cannot read image {}: {source}", path.display())]
    ImageUnreadable {
        path: PathBuf,
        source: digits_io::IoError,
    },

    /// An inspection image could not be encoded or written
    #[error("cannot write image {}: {source}", path.display())]
    ImageUnwritable {
        path: PathBuf,
        source: digits_io::IoError,
    },

    /// The configuration file could not be opened or read
    #[error("cannot read config {}: {source}", path.display())]
    ConfigUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::PipelineConfig`]
    #[error("invalid config {}: {source}", path.display())]
    ConfigInvalid {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A row or sample does not have the expected length
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Training was requested on a dataset without rows
    #[error("empty training set")]
    EmptyTrainingSet,
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
