//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and reduces them to
//! 8-bit gray. JPEG is read-only; debug output is always written as PNG.

use crate::{IoError, IoResult};
use digits_core::{ImageFormat, Pix};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// An 8-bit grayscale `Pix`. RGB is reduced with luma; 16-bit gray keeps
/// its high byte. CMYK images are rejected.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let pix = match info.pixel_format {
        PixelFormat::L8 => Pix::from_interleaved(width, height, &pixels, 1)?,
        PixelFormat::L16 => {
            // Big-endian samples: keep the high byte
            let high: Vec<u8> = pixels.chunks_exact(2).map(|s| s[0]).collect();
            Pix::from_interleaved(width, height, &high, 1)?
        }
        PixelFormat::RGB24 => Pix::from_interleaved(width, height, &pixels, 3)?,
        PixelFormat::CMYK32 => {
            return Err(IoError::UnsupportedFormat(
                "CMYK JPEG images are not supported".to_string(),
            ));
        }
    };

    let mut pix_mut = pix.to_mut();
    pix_mut.set_informat(ImageFormat::Jpeg);
    Ok(pix_mut.into())
}
