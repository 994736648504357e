//! Digits - Handwritten digit classifier
//!
//! Reads labeled scans of handwritten digits, cuts every glyph out of
//! them, turns each glyph into a 15x15 feature row and trains a
//! multilayer perceptron on the rows.
//!
//! # Overview
//!
//! - Image decoding (PNG, JPEG, PNM) to 8-bit grayscale
//! - Binary morphology used to clean up thresholded scans
//! - Border following and glyph boxes
//! - Glyph normalization by resampling
//! - Dataset construction, MLP training and evaluation
//!
//! The [`app`] module drives the whole run for the `digit-classifier`
//! binary; [`inspect`] renders segmentation results for a human to check.
//!
//! # Example
//!
//! ```
//! use digits::{Pix, region::{SegmentOptions, segment_digits}};
//!
//! // A blank page has no glyphs
//! let pix = Pix::new_filled(64, 48, 235).unwrap();
//! let boxes = segment_digits(&pix, &SegmentOptions::default()).unwrap();
//! assert!(boxes.is_empty());
//! ```

pub mod app;
pub mod inspect;

// Re-export core types (primary data structures used everywhere)
pub use digits_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use digits_io as io;
pub use digits_morph as morph;
pub use digits_recog as recog;
pub use digits_region as region;
pub use digits_transform as transform;
