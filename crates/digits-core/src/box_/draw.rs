//! Box drawing
//!
//! Outlines boxes on an image, used to render segmentation results for
//! inspection.

use crate::box_::{Box, Boxa};
use crate::error::{Error, Result};
use crate::pix::PixMut;

/// Clip a box to image bounds in signed coordinates, returning
/// `(x, y, x_end, y_end)` as `u32` or `None` if no intersection.
fn clip_box_to_image(b: &Box, img_w: u32, img_h: u32) -> Option<(u32, u32, u32, u32)> {
    let c = b.clip(img_w as i32, img_h as i32)?;
    Some((c.x as u32, c.y as u32, c.right() as u32, c.bottom() as u32))
}

impl PixMut {
    /// Draw the outline of a box with lines `width` pixels thick.
    ///
    /// The outline lies inside the box. Parts outside the image are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `width` is 0.
    pub fn draw_box(&mut self, b: &Box, width: u32, val: u8) -> Result<()> {
        if width == 0 {
            return Err(Error::InvalidParameter("line width must be > 0".into()));
        }
        let Some((x0, y0, x1, y1)) = clip_box_to_image(b, self.width(), self.height()) else {
            return Ok(());
        };
        let w = width as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                let (xi, yi) = (x as i32, y as i32);
                let on_edge = xi < b.x + w
                    || xi >= b.right() - w
                    || yi < b.y + w
                    || yi >= b.bottom() - w;
                if on_edge {
                    self.set_pixel_unchecked(x, y, val);
                }
            }
        }
        Ok(())
    }

    /// Draw the outline of every box in `boxa`.
    pub fn draw_boxa(&mut self, boxa: &Boxa, width: u32, val: u8) -> Result<()> {
        for b in boxa {
            self.draw_box(b, width, val)?;
        }
        Ok(())
    }
}
