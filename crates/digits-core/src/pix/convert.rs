//! Pixel value conversion functions
//!
//! Gray conversion of interleaved samples, binarization, and export of
//! pixel values as floating point.

use super::Pix;
use crate::error::{Error, Result};
use crate::{OFF, ON, luma};

impl Pix {
    /// Build a grayscale image from interleaved 8-bit samples.
    ///
    /// `channels` selects the layout: 1 = gray, 2 = gray + alpha,
    /// 3 = RGB, 4 = RGBA. Alpha is ignored and color is reduced with
    /// [`luma`].
    ///
    /// # Errors
    ///
    /// Returns an error for an unsupported channel count or a sample
    /// buffer that does not match the dimensions.
    pub fn from_interleaved(width: u32, height: u32, samples: &[u8], channels: usize) -> Result<Pix> {
        let npix = width as usize * height as usize;
        let expected = npix * channels;
        if samples.len() < expected {
            return Err(Error::BufferSize {
                expected,
                actual: samples.len(),
            });
        }
        let samples = &samples[..expected];
        let data = match channels {
            1 => samples.to_vec(),
            2 => samples.chunks_exact(2).map(|p| p[0]).collect(),
            3 | 4 => samples
                .chunks_exact(channels)
                .map(|p| luma(p[0], p[1], p[2]))
                .collect(),
            n => {
                return Err(Error::InvalidParameter(format!(
                    "unsupported channel count: {}",
                    n
                )));
            }
        };
        Pix::from_raw(width, height, data)
    }

    /// Binarize with a fixed threshold.
    ///
    /// Pixels strictly greater than `thresh` become [`ON`] (255); all
    /// others become [`OFF`] (0).
    pub fn threshold_binary(&self, thresh: u8) -> Pix {
        let mut pm = self.to_mut();
        for v in pm.data_mut() {
            *v = if *v > thresh { ON } else { OFF };
        }
        pm.into()
    }

    /// Copy the pixels into a row-major `f32` vector, multiplying each
    /// value by `scale`.
    pub fn to_f32_vec(&self, scale: f32) -> Vec<f32> {
        self.data().iter().map(|&v| v as f32 * scale).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let pix = Pix::from_raw(4, 1, vec![0, 180, 181, 255]).unwrap();
        let bin = pix.threshold_binary(180);
        assert_eq!(bin.data(), &[0, 0, 255, 255]);
        // Source untouched
        assert_eq!(pix.get_pixel(1, 0), Some(180));
    }

    #[test]
    fn test_threshold_is_idempotent() {
        let pix = Pix::from_raw(3, 1, vec![10, 200, 250]).unwrap();
        let once = pix.threshold_binary(180);
        let twice = once.threshold_binary(180);
        assert_eq!(once.data(), twice.data());
    }

    #[test]
    fn test_from_interleaved_rgb_and_alpha() {
        let rgb = [255, 0, 0, 10, 10, 10];
        let pix = Pix::from_interleaved(2, 1, &rgb, 3).unwrap();
        assert_eq!(pix.data(), &[76, 10]);

        let ga = [200, 0, 50, 255];
        let pix = Pix::from_interleaved(2, 1, &ga, 2).unwrap();
        assert_eq!(pix.data(), &[200, 50]);
    }

    #[test]
    fn test_from_interleaved_errors() {
        assert!(Pix::from_interleaved(2, 2, &[0; 3], 1).is_err());
        assert!(Pix::from_interleaved(1, 1, &[0; 5], 5).is_err());
    }

    #[test]
    fn test_to_f32_vec() {
        let pix = Pix::from_raw(2, 1, vec![0, 255]).unwrap();
        assert_eq!(pix.to_f32_vec(1.0), vec![0.0, 255.0]);
        let scaled = pix.to_f32_vec(1.0 / 255.0);
        assert!((scaled[1] - 1.0).abs() < 1e-6);
    }
}
