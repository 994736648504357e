//! PNM (Portable Any Map) format support
//!
//! Reads PBM (P1/P4), PGM (P2/P5) and PPM (P3/P6) into 8-bit gray, and
//! writes binary PGM (P5).
//!
//! Samples are rescaled from `0..=maxval` to `0..=255`. PBM ink (1) maps
//! to black (0). PPM is reduced with luma.

use crate::{IoError, IoResult};
use digits_core::{ImageFormat, Pix};
use std::io::{Read, Write};

/// Byte cursor over a PNM stream with header tokenizing
struct PnmParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PnmParser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and `#` comments.
    fn skip_space(&mut self) {
        while self.pos < self.data.len() {
            match self.data[self.pos] {
                b'#' => {
                    while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                c if c.is_ascii_whitespace() => self.pos += 1,
                _ => break,
            }
        }
    }

    fn read_uint(&mut self) -> IoResult<u32> {
        self.skip_space();
        let start = self.pos;
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData("expected integer in PNM data".to_string()));
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData("PNM integer out of range".to_string()))
    }

    /// Read a single ASCII PBM bit, which need not be space separated.
    fn read_bit(&mut self) -> IoResult<u32> {
        self.skip_space();
        match self.data.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1)
            }
            _ => Err(IoError::InvalidData("expected PBM bit".to_string())),
        }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }
}

fn scale_sample(v: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        v.min(255) as u8
    } else {
        ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
    }
}

/// Read a PNM image (P1..P6) from a reader.
///
/// # Returns
/// An 8-bit grayscale `Pix`.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    read_pnm_mem(&data)
}

fn read_pnm_mem(data: &[u8]) -> IoResult<Pix> {
    if data.len() < 2 || data[0] != b'P' {
        return Err(IoError::InvalidData("missing PNM magic".to_string()));
    }
    let kind = data[1];
    let mut p = PnmParser::new(&data[2..]);

    let width = p.read_uint()?;
    let height = p.read_uint()?;
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid PNM dimensions: {}x{}",
            width, height
        )));
    }
    let maxval = match kind {
        b'1' | b'4' => 1,
        _ => p.read_uint()?,
    };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PNM maxval: {}", maxval)));
    }

    let npix = width as usize * height as usize;
    let gray = match kind {
        b'1' => (0..npix)
            .map(|_| p.read_bit().map(|b| if b == 1 { 0 } else { 255 }))
            .collect::<IoResult<Vec<u8>>>()?,
        b'2' => (0..npix)
            .map(|_| p.read_uint().map(|v| scale_sample(v, maxval)))
            .collect::<IoResult<Vec<u8>>>()?,
        b'3' => {
            let rgb = (0..npix * 3)
                .map(|_| p.read_uint().map(|v| scale_sample(v, maxval)))
                .collect::<IoResult<Vec<u8>>>()?;
            return finish(Pix::from_interleaved(width, height, &rgb, 3)?);
        }
        b'4' | b'5' | b'6' => {
            // Exactly one whitespace byte separates the header from the raster
            let raster = p.remaining().get(1..).unwrap_or(&[]);
            return finish(read_binary_raster(kind, width, height, maxval, raster)?);
        }
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: P{}",
                other as char
            )));
        }
    };
    finish(Pix::from_raw(width, height, gray)?)
}

fn read_binary_raster(kind: u8, width: u32, height: u32, maxval: u32, raster: &[u8]) -> IoResult<Pix> {
    let npix = width as usize * height as usize;
    let truncated = || IoError::InvalidData("truncated PNM raster".to_string());
    match kind {
        b'4' => {
            let row_bytes = (width as usize).div_ceil(8);
            if raster.len() < row_bytes * height as usize {
                return Err(truncated());
            }
            let mut gray = Vec::with_capacity(npix);
            for row in raster.chunks(row_bytes).take(height as usize) {
                for x in 0..width as usize {
                    let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
                    gray.push(if bit == 1 { 0 } else { 255 });
                }
            }
            Ok(Pix::from_raw(width, height, gray)?)
        }
        _ => {
            let channels = if kind == b'6' { 3 } else { 1 };
            let bytes_per_sample = if maxval > 255 { 2 } else { 1 };
            let needed = npix * channels * bytes_per_sample;
            if raster.len() < needed {
                return Err(truncated());
            }
            let samples: Vec<u8> = if bytes_per_sample == 2 {
                raster[..needed]
                    .chunks_exact(2)
                    .map(|s| scale_sample(u16::from_be_bytes([s[0], s[1]]) as u32, maxval))
                    .collect()
            } else {
                raster[..needed]
                    .iter()
                    .map(|&v| scale_sample(v as u32, maxval))
                    .collect()
            };
            Ok(Pix::from_interleaved(width, height, &samples, channels)?)
        }
    }
}

fn finish(pix: Pix) -> IoResult<Pix> {
    let mut pix_mut = pix.try_into_mut().unwrap_or_else(|p| p.to_mut());
    pix_mut.set_informat(ImageFormat::Pnm);
    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PGM (P5) to a writer.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", pix.width(), pix.height())?;
    writer.write_all(pix.data())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pgm_binary_roundtrip() {
        let pix = Pix::from_raw(3, 2, vec![0, 50, 100, 150, 200, 250]).unwrap();
        let mut buf = Vec::new();
        write_pnm(&pix, &mut buf).unwrap();
        assert!(buf.starts_with(b"P5\n3 2\n255\n"));

        let back = read_pnm(buf.as_slice()).unwrap();
        assert_eq!(back.data(), pix.data());
        assert_eq!(back.informat(), ImageFormat::Pnm);
    }

    #[test]
    fn test_pgm_ascii_with_comment_and_maxval() {
        let text = b"P2\n# a comment\n2 2\n15\n0 15\n5 10\n";
        let pix = read_pnm(&text[..]).unwrap();
        assert_eq!(pix.data(), &[0, 255, 85, 170]);
    }

    #[test]
    fn test_pbm_ascii_ink_is_black() {
        let text = b"P1\n3 1\n101\n";
        let pix = read_pnm(&text[..]).unwrap();
        assert_eq!(pix.data(), &[0, 255, 0]);
    }

    #[test]
    fn test_pbm_binary() {
        let mut data = b"P4\n10 1\n".to_vec();
        data.extend_from_slice(&[0b1100_0000, 0b0100_0000]);
        let pix = read_pnm(data.as_slice()).unwrap();
        assert_eq!(pix.data(), &[0, 0, 255, 255, 255, 255, 255, 255, 255, 0]);
    }

    #[test]
    fn test_ppm_binary_to_gray() {
        let mut data = b"P6\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[255, 0, 0, 7, 7, 7]);
        let pix = read_pnm(data.as_slice()).unwrap();
        assert_eq!(pix.data(), &[76, 7]);
    }

    #[test]
    fn test_pnm_errors() {
        assert!(read_pnm(&b"P5\n2 2\n255\n\x00"[..]).is_err());
        assert!(read_pnm(&b"P9\n1 1\n255\n\x00"[..]).is_err());
        assert!(read_pnm(&b"P2\n0 1\n255\n"[..]).is_err());
    }
}
