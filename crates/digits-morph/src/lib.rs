//! digits-morph - Morphological operations for scan cleanup
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Erosion, dilation, opening, closing with arbitrary elements and
//!   separable bricks
//! - Morphological sequences for chaining brick operations from a string

pub mod binary;
mod error;
pub mod sel;
pub mod sequence;

pub use error::{MorphError, MorphResult};
pub use sel::Sel;

pub use binary::{
    close, close_brick, dilate, dilate_brick, dilate_brick_iter, erode, erode_brick,
    erode_brick_iter, open, open_brick,
};

pub use sequence::{MorphOp, MorphSequence, cleanup_sequence, morph_sequence};
