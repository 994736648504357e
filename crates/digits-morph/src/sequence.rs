//! Morphological sequence operations
//!
//! Executes sequences of brick operations specified as strings, so the
//! cleanup applied before contour extraction can be changed from a
//! configuration file.
//!
//! # Sequence String Format
//!
//! Operations are separated by `+` and whitespace is ignored.
//! Each operation begins with a case-insensitive character:
//!
//! - `d<w>.<h>` - Dilation with w x h brick structuring element
//! - `e<w>.<h>` - Erosion with w x h brick structuring element
//! - `o<w>.<h>` - Opening with w x h brick structuring element
//! - `c<w>.<h>` - Closing with w x h brick structuring element
//!
//! # Examples
//!
//! ```
//! use digits_morph::sequence::{MorphSequence, morph_sequence};
//! use digits_core::Pix;
//!
//! let seq = MorphSequence::parse("o5.5 + e3.3").unwrap();
//! assert_eq!(seq.ops().len(), 2);
//!
//! let pix = Pix::new(100, 100).unwrap();
//! let result = morph_sequence(&pix, "d3.3 + e3.3").unwrap();
//! assert_eq!(result.width(), 100);
//! ```

use crate::binary::{close_brick, dilate_brick, erode_brick, open_brick};
use crate::{MorphError, MorphResult};
use digits_core::Pix;
use std::fmt;

/// A parsed morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOp {
    /// Dilation with a brick structuring element
    Dilate {
        /// Width of the brick SE
        width: u32,
        /// Height of the brick SE
        height: u32,
    },
    /// Erosion with a brick structuring element
    Erode {
        /// Width of the brick SE
        width: u32,
        /// Height of the brick SE
        height: u32,
    },
    /// Opening (erosion followed by dilation)
    Open {
        /// Width of the brick SE
        width: u32,
        /// Height of the brick SE
        height: u32,
    },
    /// Closing (dilation followed by erosion)
    Close {
        /// Width of the brick SE
        width: u32,
        /// Height of the brick SE
        height: u32,
    },
}

impl MorphOp {
    /// Get the width and height of the operation's structuring element
    pub fn dimensions(&self) -> (u32, u32) {
        match *self {
            MorphOp::Dilate { width, height }
            | MorphOp::Erode { width, height }
            | MorphOp::Open { width, height }
            | MorphOp::Close { width, height } => (width, height),
        }
    }

    /// Apply this operation to an image
    pub fn apply(&self, pix: &Pix) -> MorphResult<Pix> {
        match *self {
            MorphOp::Dilate { width, height } => dilate_brick(pix, width, height),
            MorphOp::Erode { width, height } => erode_brick(pix, width, height),
            MorphOp::Open { width, height } => open_brick(pix, width, height),
            MorphOp::Close { width, height } => close_brick(pix, width, height),
        }
    }
}

impl fmt::Display for MorphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            MorphOp::Dilate { .. } => 'd',
            MorphOp::Erode { .. } => 'e',
            MorphOp::Open { .. } => 'o',
            MorphOp::Close { .. } => 'c',
        };
        let (w, h) = self.dimensions();
        write!(f, "{}{}.{}", code, w, h)
    }
}

/// A parsed morphological sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphSequence {
    /// The operations in the sequence
    ops: Vec<MorphOp>,
}

impl MorphSequence {
    /// Build a sequence from already-validated operations
    pub fn from_ops(ops: Vec<MorphOp>) -> MorphResult<Self> {
        if ops.is_empty() {
            return Err(MorphError::InvalidSequence("empty sequence".to_string()));
        }
        for op in &ops {
            let (w, h) = op.dimensions();
            if w == 0 || h == 0 {
                return Err(MorphError::InvalidSequence(format!(
                    "dimensions must be > 0, got {}x{}",
                    w, h
                )));
            }
        }
        Ok(MorphSequence { ops })
    }

    /// Parse a sequence string into a MorphSequence
    ///
    /// # Examples
    ///
    /// ```
    /// use digits_morph::sequence::MorphSequence;
    ///
    /// let seq = MorphSequence::parse("d3.3 + e5.5").unwrap();
    /// assert_eq!(seq.ops().len(), 2);
    /// ```
    pub fn parse(sequence: &str) -> MorphResult<Self> {
        if sequence.trim().is_empty() {
            return Err(MorphError::InvalidSequence("empty sequence".to_string()));
        }

        let ops = sequence
            .split('+')
            .enumerate()
            .map(|(i, part)| {
                let op_str: String = part.chars().filter(|c| !c.is_whitespace()).collect();
                if op_str.is_empty() {
                    return Err(MorphError::InvalidSequence(format!(
                        "empty operation at position {}",
                        i + 1
                    )));
                }
                Self::parse_operation(&op_str)
            })
            .collect::<MorphResult<Vec<_>>>()?;

        Ok(MorphSequence { ops })
    }

    /// Parse a single operation string without whitespace
    fn parse_operation(op_str: &str) -> MorphResult<MorphOp> {
        let mut chars = op_str.chars();
        let first_char = chars
            .next()
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or_default();
        let rest = chars.as_str();

        let ctor: fn(u32, u32) -> MorphOp = match first_char {
            'd' => |width, height| MorphOp::Dilate { width, height },
            'e' => |width, height| MorphOp::Erode { width, height },
            'o' => |width, height| MorphOp::Open { width, height },
            'c' => |width, height| MorphOp::Close { width, height },
            _ => {
                return Err(MorphError::InvalidSequence(format!(
                    "unknown operation '{}' in '{}'",
                    first_char, op_str
                )));
            }
        };
        let (width, height) = Self::parse_dimensions(rest)?;
        Ok(ctor(width, height))
    }

    /// Parse dimensions from a string like "3.5" -> (3, 5)
    fn parse_dimensions(dim_str: &str) -> MorphResult<(u32, u32)> {
        let (w, h) = dim_str.split_once('.').ok_or_else(|| {
            MorphError::InvalidSequence(format!(
                "invalid dimensions format '{}', expected 'width.height'",
                dim_str
            ))
        })?;

        let width: u32 = w.parse().map_err(|_| {
            MorphError::InvalidSequence(format!("invalid width '{}' in '{}'", w, dim_str))
        })?;

        let height: u32 = h.parse().map_err(|_| {
            MorphError::InvalidSequence(format!("invalid height '{}' in '{}'", h, dim_str))
        })?;

        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSequence(format!(
                "dimensions must be > 0, got {}x{}",
                width, height
            )));
        }

        Ok((width, height))
    }

    /// Get the operations in this sequence
    pub fn ops(&self) -> &[MorphOp] {
        &self.ops
    }

    /// Apply every operation in order
    pub fn apply(&self, pix: &Pix) -> MorphResult<Pix> {
        self.ops
            .iter()
            .try_fold(pix.clone(), |acc, op| op.apply(&acc))
    }
}

impl fmt::Display for MorphSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

/// Parse `sequence` and apply it to `pix`
pub fn morph_sequence(pix: &Pix, sequence: &str) -> MorphResult<Pix> {
    MorphSequence::parse(sequence)?.apply(pix)
}

/// The glyph cleanup sequence: `erosions` erosions followed by `dilations`
/// dilations with a `size x size` brick.
///
/// Returns `None` when both counts are zero (nothing to do).
pub fn cleanup_sequence(erosions: u32, dilations: u32, size: u32) -> MorphResult<Option<MorphSequence>> {
    let erode = MorphOp::Erode {
        width: size,
        height: size,
    };
    let dilate = MorphOp::Dilate {
        width: size,
        height: size,
    };
    let ops: Vec<MorphOp> = std::iter::repeat_n(erode, erosions as usize)
        .chain(std::iter::repeat_n(dilate, dilations as usize))
        .collect();
    if ops.is_empty() {
        return Ok(None);
    }
    MorphSequence::from_ops(ops).map(Some)
}
