//! digits-region - Glyph segmentation for the digit classifier
//!
//! This crate provides:
//!
//! - **Border following** - outer and hole borders of a binary image,
//!   with optional chain approximation ([`contour`])
//! - **Glyph segmentation** - threshold, cleanup and border filtering that
//!   turn a scan into one bounding box per glyph ([`segment`])
//!
//! # Examples
//!
//! ```
//! use digits_core::Pix;
//! use digits_region::{SegmentOptions, segment_digits};
//!
//! // A page without ink has no glyphs
//! let pix = Pix::new_filled(64, 48, 235).unwrap();
//! let boxes = segment_digits(&pix, &SegmentOptions::default()).unwrap();
//! assert!(boxes.is_empty());
//! ```

pub mod contour;
mod error;
pub mod segment;

pub use contour::{
    BorderPoint, BorderType, ChainApprox, Contour, Direction, approximate_chain, find_contours,
    to_chain_code,
};
pub use error::{RegionError, RegionResult};
pub use segment::{ContourFilter, MAX_PADDING, SegmentOptions, segment_digits};
