//! Rectangle clipping
//!
//! Extracts sub-images, used to cut glyph crops out of a page scan.

use super::Pix;
use crate::box_::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Extract a rectangular region.
    ///
    /// The rectangle is clipped to the image bounds, so the result may be
    /// smaller than `w x h`.
    ///
    /// # Errors
    ///
    /// Returns an error if `w` or `h` is 0 or the origin lies outside the image.
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Pix> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle has zero dimension: {}x{}",
                w, h
            )));
        }

        let src_w = self.width();
        let src_h = self.height();
        if x >= src_w || y >= src_h {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle origin ({}, {}) is outside image bounds ({}x{})",
                x, y, src_w, src_h
            )));
        }

        let clip_w = w.min(src_w - x);
        let clip_h = h.min(src_h - y);

        let mut data = Vec::with_capacity(clip_w as usize * clip_h as usize);
        for row in y..y + clip_h {
            let start = x as usize;
            data.extend_from_slice(&self.row(row)[start..start + clip_w as usize]);
        }
        Pix::from_raw(clip_w, clip_h, data)
    }

    /// Extract the region covered by `b`, clipped to the image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoxOutsideImage`] if the box does not overlap the image.
    pub fn clip_box(&self, b: &Box) -> Result<Pix> {
        let clipped = b
            .clip(self.width() as i32, self.height() as i32)
            .ok_or(Error::BoxOutsideImage {
                x: b.x,
                y: b.y,
                w: b.w,
                h: b.h,
                width: self.width(),
                height: self.height(),
            })?;
        self.clip_rectangle(
            clipped.x as u32,
            clipped.y as u32,
            clipped.w as u32,
            clipped.h as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: u32, h: u32) -> Pix {
        let data = (0..w * h).map(|v| v as u8).collect();
        Pix::from_raw(w, h, data).unwrap()
    }

    #[test]
    fn test_clip_rectangle_basic() {
        let pix = ramp(6, 5);
        let sub = pix.clip_rectangle(1, 2, 3, 2).unwrap();
        assert_eq!((sub.width(), sub.height()), (3, 2));
        assert_eq!(sub.row(0), &[13, 14, 15]);
        assert_eq!(sub.row(1), &[19, 20, 21]);
    }

    #[test]
    fn test_clip_rectangle_truncates() {
        let pix = ramp(6, 5);
        let sub = pix.clip_rectangle(4, 3, 10, 10).unwrap();
        assert_eq!((sub.width(), sub.height()), (2, 2));
    }

    #[test]
    fn test_clip_rectangle_invalid() {
        let pix = ramp(6, 5);
        assert!(pix.clip_rectangle(6, 0, 1, 1).is_err());
        assert!(pix.clip_rectangle(0, 0, 0, 1).is_err());
    }

    #[test]
    fn test_clip_box_negative_origin() {
        let pix = ramp(6, 5);
        let sub = pix.clip_box(&Box::new_unchecked(-1, -1, 3, 3)).unwrap();
        assert_eq!((sub.width(), sub.height()), (2, 2));
        assert_eq!(sub.row(0), &[0, 1]);
    }

    #[test]
    fn test_clip_box_outside() {
        let pix = ramp(6, 5);
        let err = pix.clip_box(&Box::new_unchecked(10, 0, 2, 2)).unwrap_err();
        assert!(matches!(err, Error::BoxOutsideImage { x: 10, .. }));
    }
}
