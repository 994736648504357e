//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological operations.

use crate::{MorphError, MorphResult};

/// Structuring Element (SEL)
///
/// A grid of hit positions with an origin (cx, cy) that is the reference
/// point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    hits: Vec<bool>,
}

impl Sel {
    /// Create a structuring element with no hits and a centred origin
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be > 0, got {}x{}",
                width, height
            )));
        }
        Ok(Sel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            hits: vec![false; (width * height) as usize],
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.hits.fill(true);
        Ok(sel)
    }

    /// Create a square structuring element with all hits
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// Create a cross (+) structuring element of odd `size`
    pub fn create_cross(size: u32) -> MorphResult<Self> {
        if size % 2 == 0 {
            return Err(MorphError::InvalidSel(format!(
                "cross size must be odd, got {}",
                size
            )));
        }
        let mut sel = Self::new(size, size)?;
        let c = size / 2;
        for i in 0..size {
            sel.set_hit(c, i, true);
            sel.set_hit(i, c, true);
        }
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({}, {}) outside {}x{} element",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Check whether (x, y) is a hit
    pub fn is_hit(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.hits[(y * self.width + x) as usize]
    }

    /// Set or clear the hit at (x, y); out-of-range positions are ignored
    pub fn set_hit(&mut self, x: u32, y: u32, hit: bool) {
        if x < self.width && y < self.height {
            self.hits[(y * self.width + x) as usize] = hit;
        }
    }

    /// Number of hits
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }

    /// Check whether every position is a hit
    pub fn is_brick(&self) -> bool {
        self.hits.iter().all(|&h| h)
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.hits
            .iter()
            .enumerate()
            .filter_map(move |(idx, &hit)| {
                if hit {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick() {
        let sel = Sel::create_brick(3, 5).unwrap();
        assert_eq!(sel.hit_count(), 15);
        assert_eq!((sel.origin_x(), sel.origin_y()), (1, 2));
        assert!(sel.is_brick());

        let offsets: Vec<_> = sel.hit_offsets().collect();
        assert_eq!(offsets.first(), Some(&(-1, -2)));
        assert_eq!(offsets.last(), Some(&(1, 2)));
    }

    #[test]
    fn test_even_brick_origin() {
        // Anchor of an even size falls right of centre
        let sel = Sel::create_square(4).unwrap();
        assert_eq!((sel.origin_x(), sel.origin_y()), (2, 2));
    }

    #[test]
    fn test_cross() {
        let sel = Sel::create_cross(3).unwrap();
        assert_eq!(sel.hit_count(), 5);
        assert!(sel.is_hit(1, 0));
        assert!(!sel.is_hit(0, 0));
        assert!(!sel.is_brick());
        assert!(Sel::create_cross(4).is_err());
    }

    #[test]
    fn test_invalid() {
        assert!(Sel::new(0, 3).is_err());
        let mut sel = Sel::create_square(3).unwrap();
        assert!(sel.set_origin(3, 0).is_err());
        assert!(sel.set_origin(0, 0).is_ok());
    }
}
