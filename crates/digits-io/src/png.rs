//! PNG image format support
//!
//! Any PNG layout is decoded to 8-bit gray: palettes and low bit depths
//! are expanded, 16-bit samples keep their high byte, color is reduced
//! with the BT.601 luma weights and alpha is dropped.

use crate::{IoError, IoResult};
use digits_core::{ImageFormat, Pix};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?} {:?}",
            color_type, bit_depth
        )));
    }
    let channels = color_type.samples();

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    // Rows may carry trailing bytes past width * channels
    let row_bytes = width as usize * channels;
    let mut samples = Vec::with_capacity(row_bytes * height as usize);
    for row in buf[..output_info.buffer_size()]
        .chunks(output_info.line_size)
        .take(height as usize)
    {
        if row.len() < row_bytes {
            return Err(IoError::InvalidData("truncated PNG row".to_string()));
        }
        samples.extend_from_slice(&row[..row_bytes]);
    }

    let pix = Pix::from_interleaved(width, height, &samples, channels)?;
    let mut pix_mut = pix.to_mut();
    pix_mut.set_informat(ImageFormat::Png);
    Ok(pix_mut.into())
}

/// Write a PNG image as 8-bit grayscale
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(pix.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(width: u32, height: u32, color: ColorType, depth: BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_png_gray_roundtrip() {
        let data: Vec<u8> = (0..35).map(|v| (v * 7) as u8).collect();
        let pix = Pix::from_raw(7, 5, data).unwrap();

        let mut buf = Vec::new();
        write_png(&pix, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();

        assert_eq!(back.width(), 7);
        assert_eq!(back.height(), 5);
        assert_eq!(back.data(), pix.data());
        assert_eq!(back.informat(), ImageFormat::Png);
    }

    #[test]
    fn test_png_rgb_to_gray() {
        let bytes = encode(2, 1, ColorType::Rgb, BitDepth::Eight, &[255, 0, 0, 9, 9, 9]);
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.data(), &[76, 9]);
    }

    #[test]
    fn test_png_rgba_ignores_alpha() {
        let bytes = encode(1, 1, ColorType::Rgba, BitDepth::Eight, &[200, 200, 200, 0]);
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.data(), &[200]);
    }

    #[test]
    fn test_png_one_bit_expands() {
        // 10 pixels: 1010101010 padded into two bytes
        let bytes = encode(10, 1, ColorType::Grayscale, BitDepth::One, &[0b1010_1010, 0b1000_0000]);
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.width(), 10);
        assert_eq!(pix.data(), &[255, 0, 255, 0, 255, 0, 255, 0, 255, 0]);
    }

    #[test]
    fn test_png_sixteen_bit_keeps_high_byte() {
        let bytes = encode(2, 1, ColorType::Grayscale, BitDepth::Sixteen, &[0xAB, 0xCD, 0x01, 0xFF]);
        let pix = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.data(), &[0xAB, 0x01]);
    }

    #[test]
    fn test_png_garbage_fails() {
        assert!(read_png(Cursor::new(vec![0u8; 16])).is_err());
    }
}
