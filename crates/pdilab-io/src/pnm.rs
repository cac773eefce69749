//! PNM (Portable Any Map) format support
//!
//! Reads and writes PBM (P4 binary), PGM (P5 binary), and
//! PPM (P6 binary) formats. ASCII variants (P1/P2/P3) are not supported.

use crate::{IoError, IoResult};
use pdilab_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::{BufRead, Read, Write};

/// Read the next whitespace-delimited header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut in_comment = false;
    loop {
        let mut byte = [0u8; 1];
        if reader.read(&mut byte)? == 0 {
            break;
        }
        let c = byte[0];
        if in_comment {
            in_comment = c != b'\n';
            continue;
        }
        if c == b'#' && token.is_empty() {
            in_comment = true;
        } else if c.is_ascii_whitespace() {
            if !token.is_empty() {
                break;
            }
        } else {
            token.push(c as char);
        }
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PNM header".to_string()));
    }
    Ok(token)
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("bad PNM {what}: {token:?}")))
}

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// # Returns
/// A `Pix` at 1 bpp (PBM), 8 bpp (PGM), or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let magic = read_token(&mut reader)?;
    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;

    let (depth, maxval) = match magic.as_str() {
        "P4" => (PixelDepth::Bit1, 1),
        "P5" => (PixelDepth::Bit8, read_number(&mut reader, "maxval")?),
        "P6" => (PixelDepth::Bit32, read_number(&mut reader, "maxval")?),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {other} not supported"
            )));
        }
    };
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {maxval} not supported"
        )));
    }

    let row_bytes = match depth {
        PixelDepth::Bit1 => width.div_ceil(8),
        PixelDepth::Bit8 => width,
        PixelDepth::Bit32 => width * 3,
    } as usize;
    let mut data = vec![0u8; row_bytes * height as usize];
    reader
        .read_exact(&mut data)
        .map_err(|e| IoError::InvalidData(format!("truncated PNM raster: {e}")))?;

    let scale = |v: u8| -> u8 { ((v as u32 * 255 + maxval / 2) / maxval).min(255) as u8 };

    let mut pix_mut = Pix::new(width, height, depth)?.into_mut();
    pix_mut.set_informat(ImageFormat::Pnm);

    for y in 0..height {
        let row = &data[y as usize * row_bytes..(y as usize + 1) * row_bytes];
        for x in 0..width {
            let val = match depth {
                PixelDepth::Bit1 => ((row[(x / 8) as usize] >> (7 - (x % 8))) & 1) as u32,
                PixelDepth::Bit8 => scale(row[x as usize]) as u32,
                PixelDepth::Bit32 => {
                    let i = x as usize * 3;
                    color::compose_rgb(scale(row[i]), scale(row[i + 1]), scale(row[i + 2]))
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P4 (1 bpp), P5 (8 bpp grayscale), or P6 (32 bpp RGB)
/// based on the pixel depth.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    match pix.depth() {
        PixelDepth::Bit1 => {
            write!(writer, "P4\n{width} {height}\n")?;
            let row_bytes = width.div_ceil(8) as usize;
            let mut row = vec![0u8; row_bytes];
            for y in 0..height {
                row.fill(0);
                for x in 0..width {
                    if pix.get_pixel_unchecked(x, y) != 0 {
                        row[(x / 8) as usize] |= 1 << (7 - (x % 8));
                    }
                }
                writer.write_all(&row)?;
            }
        }
        PixelDepth::Bit8 => {
            write!(writer, "P5\n{width} {height}\n255\n")?;
            let mut row = Vec::with_capacity(width as usize);
            for y in 0..height {
                row.clear();
                row.extend((0..width).map(|x| pix.get_pixel_unchecked(x, y) as u8));
                writer.write_all(&row)?;
            }
        }
        PixelDepth::Bit32 => {
            write!(writer, "P6\n{width} {height}\n255\n")?;
            let mut row = Vec::with_capacity(width as usize * 3);
            for y in 0..height {
                row.clear();
                for x in 0..width {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    row.extend_from_slice(&[r, g, b]);
                }
                writer.write_all(&row)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
