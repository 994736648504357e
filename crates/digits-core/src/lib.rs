//! Digits Core - Basic data structures for scan processing
//!
//! This crate provides the fundamental data structures used throughout
//! the digit classifier workspace:
//!
//! - [`Pix`] / [`PixMut`] - 8-bit grayscale image container (immutable / mutable)
//! - [`Box`] / [`Boxa`] - Rectangle regions
//! - [`ImageFormat`] - Raster formats understood by `digits-io`
//!
//! Binary images are plain 8-bit images whose pixels are either 0 ("off")
//! or 255 ("on"); see [`Pix::threshold_binary`].

pub mod box_;
pub mod error;
pub mod pix;

pub use box_::{Box, Boxa};
pub use error::{Error, Result};
pub use pix::{ImageFormat, Pix, PixMut};

/// Gray value of an "on" pixel in a binary image.
pub const ON: u8 = 255;

/// Gray value of an "off" pixel in a binary image.
pub const OFF: u8 = 0;

/// Luma conversion for RGB samples.
///
/// Uses the ITU-R BT.601 weights with integer arithmetic, rounded to
/// the nearest value: `(299 R + 587 G + 114 B + 500) / 1000`.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}
