//! JPEG image format support
//!
//! Reads with `jpeg-decoder` and writes baseline JFIF with `jpeg-encoder`.
//! Grayscale decodes to 8 bpp; RGB and CMYK decode to 32 bpp RGB.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use pdilab_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::{Read, Write};

/// Default JPEG quality for written images
pub const DEFAULT_QUALITY: u8 = 95;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// A `Pix` at 8 bpp (grayscale) or 32 bpp (RGB).
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let (depth, samples) = match info.pixel_format {
        PixelFormat::L8 => (PixelDepth::Bit8, 1),
        PixelFormat::L16 => (PixelDepth::Bit8, 2),
        PixelFormat::RGB24 => (PixelDepth::Bit32, 3),
        PixelFormat::CMYK32 => (PixelDepth::Bit32, 4),
    };
    let needed = width as usize * height as usize * samples;
    if data.len() < needed {
        return Err(IoError::InvalidData(format!(
            "JPEG buffer holds {} bytes, expected {}",
            data.len(),
            needed
        )));
    }

    let mut pix_mut = Pix::new(width, height, depth)?.into_mut();
    pix_mut.set_informat(ImageFormat::Jpeg);

    for (i, px) in data[..needed].chunks_exact(samples).enumerate() {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        let val = match info.pixel_format {
            PixelFormat::L8 => px[0] as u32,
            // big-endian samples, keep the high byte
            PixelFormat::L16 => px[0] as u32,
            PixelFormat::RGB24 => color::compose_rgb(px[0], px[1], px[2]),
            PixelFormat::CMYK32 => {
                let (r, g, b) = cmyk_to_rgb(px[0], px[1], px[2], px[3]);
                color::compose_rgb(r, g, b)
            }
        };
        pix_mut.set_pixel_unchecked(x, y, val);
    }

    Ok(pix_mut.into())
}

/// The decoder hands back Adobe-inverted CMYK, so each channel scales by K.
fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> (u8, u8, u8) {
    let scale = |v: u8| ((v as u32 * k as u32 + 127) / 255) as u8;
    (scale(c), scale(m), scale(y))
}

/// Write a `Pix` as JPEG.
///
/// 8 bpp writes single-channel luma, 32 bpp writes RGB (alpha dropped).
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for 1 bpp input and
/// [`IoError::InvalidData`] for images wider or taller than 65535.
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(pix.width())
        .map_err(|_| IoError::InvalidData(format!("JPEG width {} too large", pix.width())))?;
    let height = u16::try_from(pix.height())
        .map_err(|_| IoError::InvalidData(format!("JPEG height {} too large", pix.height())))?;

    let (color_type, data) = match pix.depth() {
        PixelDepth::Bit8 => {
            let mut data = Vec::with_capacity(width as usize * height as usize);
            for y in 0..pix.height() {
                for x in 0..pix.width() {
                    data.push(pix.get_pixel_unchecked(x, y) as u8);
                }
            }
            (ColorType::Luma, data)
        }
        PixelDepth::Bit32 => {
            let mut data = Vec::with_capacity(width as usize * height as usize * 3);
            for y in 0..pix.height() {
                for x in 0..pix.width() {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    data.extend_from_slice(&[r, g, b]);
                }
            }
            (ColorType::Rgb, data)
        }
        PixelDepth::Bit1 => {
            return Err(IoError::UnsupportedFormat(
                "JPEG requires 8 or 32 bpp".to_string(),
            ));
        }
    };

    let encoder = Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(&data, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn smooth_gray() -> Pix {
        let mut pm = Pix::new(32, 24, PixelDepth::Bit8).unwrap().into_mut();
        for y in 0..24 {
            for x in 0..32 {
                pm.set_pixel_unchecked(x, y, 60 + 2 * x + y);
            }
        }
        pm.into()
    }

    #[test]
    fn test_jpeg_roundtrip_gray_is_close() {
        let pix = smooth_gray();
        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer, DEFAULT_QUALITY).unwrap();
        let back = read_jpeg(Cursor::new(buffer)).unwrap();

        assert_eq!((back.width(), back.height()), (32, 24));
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.informat(), ImageFormat::Jpeg);
        let diff = back.count_pixel_diffs(&pix).unwrap();
        assert!(diff.max_diff <= 8, "max diff {}", diff.max_diff);
    }

    #[test]
    fn test_jpeg_rgb_decodes_to_32bpp() {
        let mut pm = Pix::new(16, 16, PixelDepth::Bit32).unwrap().into_mut();
        for y in 0..16 {
            for x in 0..16 {
                pm.set_rgb(x, y, 200, 100, 50).unwrap();
            }
        }
        let pix: Pix = pm.into();
        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer, DEFAULT_QUALITY).unwrap();
        let back = read_jpeg(Cursor::new(buffer)).unwrap();

        assert_eq!(back.depth(), PixelDepth::Bit32);
        let (r, g, b) = back.get_rgb(8, 8).unwrap();
        assert!(r.abs_diff(200) <= 4 && g.abs_diff(100) <= 4 && b.abs_diff(50) <= 4);
    }

    #[test]
    fn test_jpeg_rejects_binary() {
        let pix = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        assert!(write_jpeg(&pix, Vec::new(), DEFAULT_QUALITY).is_err());
    }

    #[test]
    fn test_cmyk_conversion() {
        assert_eq!(cmyk_to_rgb(255, 255, 255, 255), (255, 255, 255));
        assert_eq!(cmyk_to_rgb(255, 0, 128, 0), (0, 0, 0));
    }
}
