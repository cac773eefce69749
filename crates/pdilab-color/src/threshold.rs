//! Fixed-level thresholding
//!
//! Every rule compares each sample strictly against `thresh`:
//!
//! | rule | `v > thresh` | otherwise |
//! |---|---|---|
//! | `Binary` | `maxval` | 0 |
//! | `BinaryInv` | 0 | `maxval` |
//! | `Trunc` | `thresh` | `v` |
//! | `ToZero` | `v` | 0 |
//! | `ToZeroInv` | 0 | `v` |

use crate::{ColorError, ColorResult};
use pdilab_core::{Pix, PixelDepth, color};

/// Thresholding rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdType {
    /// `maxval` above the threshold, 0 elsewhere
    Binary,
    /// 0 above the threshold, `maxval` elsewhere
    BinaryInv,
    /// Clamp values above the threshold to the threshold
    Trunc,
    /// Keep values above the threshold, zero the rest
    ToZero,
    /// Zero values above the threshold, keep the rest
    ToZeroInv,
}

impl ThresholdType {
    /// Apply the rule to one sample.
    #[inline]
    pub fn apply(self, v: u8, thresh: u8, maxval: u8) -> u8 {
        let above = v > thresh;
        match self {
            Self::Binary => {
                if above {
                    maxval
                } else {
                    0
                }
            }
            Self::BinaryInv => {
                if above {
                    0
                } else {
                    maxval
                }
            }
            Self::Trunc => v.min(thresh),
            Self::ToZero => {
                if above {
                    v
                } else {
                    0
                }
            }
            Self::ToZeroInv => {
                if above {
                    0
                } else {
                    v
                }
            }
        }
    }

    fn lut(self, thresh: u8, maxval: u8) -> [u8; 256] {
        let mut lut = [0u8; 256];
        for (v, out) in lut.iter_mut().enumerate() {
            *out = self.apply(v as u8, thresh, maxval);
        }
        lut
    }
}

/// Threshold an image with a fixed level.
///
/// 8 bpp images are mapped sample by sample; 32 bpp images per RGB channel
/// with alpha kept. `maxval` only matters for the binary rules.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if `thresh` or `maxval`
/// exceed 255, and [`ColorError::UnsupportedDepth`] for 1 bpp input.
pub fn threshold(pix: &Pix, thresh: u32, maxval: u32, kind: ThresholdType) -> ColorResult<Pix> {
    let (thresh, maxval) = match (u8::try_from(thresh), u8::try_from(maxval)) {
        (Ok(t), Ok(m)) => (t, m),
        _ => {
            return Err(ColorError::InvalidParameters(format!(
                "threshold {thresh} and maxval {maxval} must be in 0..=255"
            )));
        }
    };
    let lut = kind.lut(thresh, maxval);

    let mut out = pix.create_template().into_mut();
    match pix.depth() {
        PixelDepth::Bit8 => {
            for y in 0..pix.height() {
                for x in 0..pix.width() {
                    let v = pix.get_pixel_unchecked(x, y) as usize;
                    out.set_pixel_unchecked(x, y, lut[v] as u32);
                }
            }
        }
        PixelDepth::Bit32 => {
            for y in 0..pix.height() {
                for x in 0..pix.width() {
                    let (r, g, b, a) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    let val = color::compose_rgba(
                        lut[r as usize],
                        lut[g as usize],
                        lut[b as usize],
                        a,
                    );
                    out.set_pixel_unchecked(x, y, val);
                }
            }
        }
        PixelDepth::Bit1 => {
            return Err(ColorError::UnsupportedDepth {
                expected: "8 or 32 bpp",
                actual: 1,
            });
        }
    }

    Ok(out.into())
}
