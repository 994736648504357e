//! digits-transform - Geometric transformations
//!
//! Resampling used to normalize glyph crops to a fixed feature grid:
//! bilinear interpolation, nearest-neighbor sampling and area mapping.

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{ScaleMethod, scale_to_size_with};
