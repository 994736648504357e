//! Pipeline configuration
//!
//! Every tunable of segmentation, feature construction and training, with
//! defaults that reproduce the classic setup. Loaded from TOML; any key
//! left out keeps its default and unknown keys are rejected.
//!
//! ```toml
//! [segment]
//! threshold = 170
//! filter = "drop-last"
//!
//! [features]
//! normalize = true
//!
//! [mlp]
//! max_iterations = 300
//!
//! [mlp.rprop]
//! dw0 = 0.05
//! ```

use crate::dataset::NUM_CLASSES;
use crate::features::FeatureOptions;
use crate::mlp::MlpParams;
use crate::{RecogError, RecogResult};
use digits_region::SegmentOptions;
use serde::Deserialize;
use std::path::Path;

/// Configuration of the whole pipeline
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Glyph segmentation
    pub segment: SegmentOptions,
    /// Feature rows
    pub features: FeatureOptions,
    /// Classifier training
    pub mlp: MlpParams,
}

impl PipelineConfig {
    /// Load and validate a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> RecogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RecogError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| RecogError::ConfigInvalid {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section, including that the network has no empty layer
    /// for the configured feature size
    pub fn validate(&self) -> RecogResult<()> {
        self.segment.validate()?;
        self.features.validate()?;
        self.mlp.validate()?;
        self.mlp
            .layer_sizes(self.features.feature_len(), NUM_CLASSES)
            .map(|_| ())
    }
}
