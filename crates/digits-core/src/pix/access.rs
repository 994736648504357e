//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies past the end of the buffer.
    #[inline]
    fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies past the end of the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let w = self.width() as usize;
        self.data_mut()[y as usize * w + x as usize] = val;
    }

    /// Fill the rectangle `[x0, x1) x [y0, y1)` with `val`, clipped to the image.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, val: u8) {
        let x1 = x1.min(self.width());
        let y1 = y1.min(self.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel_unchecked(x, y, val);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_pixel() {
        let pix = Pix::new(4, 3).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_pixel(3, 2, 99).unwrap();
        assert_eq!(pm.get_pixel(3, 2), Some(99));

        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(3, 2), Some(99));
        assert_eq!(pix.get_pixel(0, 0), Some(0));
        assert_eq!(pix.get_pixel(4, 0), None);
        assert_eq!(pix.get_pixel(0, 3), None);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut pm = Pix::new(4, 3).unwrap().to_mut();
        assert!(matches!(
            pm.set_pixel(4, 0, 1),
            Err(Error::PixelOutOfBounds { x: 4, y: 0, .. })
        ));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut pm = Pix::new(5, 5).unwrap().to_mut();
        pm.fill_rect(3, 3, 10, 10, 255);
        let pix: Pix = pm.into();
        assert_eq!(pix.count_on(), 4);
        assert_eq!(pix.get_pixel(4, 4), Some(255));
        assert_eq!(pix.get_pixel(2, 2), Some(0));
    }
}
