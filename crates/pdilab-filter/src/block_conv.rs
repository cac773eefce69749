//! Block convolution using integral images (summed area tables)
//!
//! Normalized box filter that runs in O(1) per pixel regardless of kernel
//! size. The input is padded by reflect-101 before the integral image is
//! accumulated, so border windows average mirrored pixels rather than a
//! shrunken neighborhood.

use crate::border::reflect101;
use crate::{FilterError, FilterResult};
use pdilab_core::pix::RgbComponent;
use pdilab_core::{Pix, PixelDepth};

/// Summed area table of an 8 bpp image padded by reflect-101.
///
/// Entry `(x, y)` of the table (with a leading zero row and column) holds
/// the sum of padded pixels in `[0, x) x [0, y)`.
struct Integral {
    stride: usize,
    sums: Vec<u64>,
}

impl Integral {
    fn new(pix: &Pix, pad_left: u32, pad_top: u32, padded_w: u32, padded_h: u32) -> Self {
        let w = pix.width();
        let h = pix.height();
        let stride = padded_w as usize + 1;
        let mut sums = vec![0u64; stride * (padded_h as usize + 1)];

        for py in 0..padded_h as usize {
            let sy = reflect101(py as i64 - pad_top as i64, h);
            let mut row_sum = 0u64;
            for px in 0..padded_w as usize {
                let sx = reflect101(px as i64 - pad_left as i64, w);
                row_sum += pix.get_pixel_unchecked(sx, sy) as u64;
                sums[(py + 1) * stride + px + 1] = sums[py * stride + px + 1] + row_sum;
            }
        }

        Integral { stride, sums }
    }

    /// Sum over the `kw x kh` window whose top-left padded corner is `(x, y)`.
    #[inline]
    fn window(&self, x: usize, y: usize, kw: usize, kh: usize) -> u64 {
        let s = self.stride;
        self.sums[(y + kh) * s + x + kw] + self.sums[y * s + x]
            - self.sums[y * s + x + kw]
            - self.sums[(y + kh) * s + x]
    }
}

/// Normalized box filter on an 8 bpp image.
fn box_blur_gray(pix: &Pix, kw: u32, kh: u32) -> FilterResult<Pix> {
    let w = pix.width();
    let h = pix.height();
    // anchor at the kernel center, as for even sizes: left/top get k / 2
    let pad_left = kw / 2;
    let pad_top = kh / 2;
    let integral = Integral::new(pix, pad_left, pad_top, w + kw - 1, h + kh - 1);

    let area = (kw * kh) as f64;
    let mut out = Pix::new(w, h, PixelDepth::Bit8)?.into_mut();
    for y in 0..h {
        for x in 0..w {
            let sum = integral.window(x as usize, y as usize, kw as usize, kh as usize);
            let val = (sum as f64 / area).round_ties_even() as u32;
            out.set_pixel_unchecked(x, y, val.min(255));
        }
    }

    Ok(out.into())
}

/// Normalized box (mean) filter.
///
/// Each output pixel is the mean of the `kw x kh` window anchored at the
/// kernel center, rounded to nearest. Borders are handled by reflect-101.
/// A 1x1 kernel returns an exact copy. 32 bpp images are filtered per
/// channel (alpha is dropped).
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if either kernel dimension
/// is zero and [`FilterError::UnsupportedDepth`] for 1 bpp input.
pub fn box_blur(pix: &Pix, kw: u32, kh: u32) -> FilterResult<Pix> {
    if kw == 0 || kh == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "box kernel must be at least 1x1, got {kw}x{kh}"
        )));
    }
    if kw == 1 && kh == 1 {
        return Ok(pix.deep_clone());
    }

    match pix.depth() {
        PixelDepth::Bit8 => box_blur_gray(pix, kw, kh),
        PixelDepth::Bit32 => {
            let r = box_blur_gray(&pix.get_rgb_component(RgbComponent::Red)?, kw, kh)?;
            let g = box_blur_gray(&pix.get_rgb_component(RgbComponent::Green)?, kw, kh)?;
            let b = box_blur_gray(&pix.get_rgb_component(RgbComponent::Blue)?, kw, kh)?;
            Ok(Pix::create_rgb_image(&r, &g, &b)?)
        }
        PixelDepth::Bit1 => Err(FilterError::UnsupportedDepth {
            expected: "8 or 32 bpp",
            actual: 1,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_rows(rows: &[&[u32]]) -> Pix {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().into_mut();
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                pm.set_pixel_unchecked(x as u32, y as u32, v);
            }
        }
        pm.into()
    }

    #[test]
    fn test_identity_kernel() {
        let pix = from_rows(&[&[1, 2, 3], &[4, 5, 6]]);
        let out = box_blur(&pix, 1, 1).unwrap();
        assert!(out.equals(&pix));
    }

    #[test]
    fn test_interior_mean() {
        let pix = from_rows(&[&[0, 0, 0, 0], &[0, 90, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let out = box_blur(&pix, 3, 3).unwrap();
        assert_eq!(out.get_pixel(2, 2), Some(10));
        assert_eq!(out.get_pixel(3, 3), Some(0));
    }

    #[test]
    fn test_reflect101_border() {
        // row 0 reflected about itself: window at (0,0) covers rows 1,0,1
        // and columns 1,0,1 so the corner sees the 90 four times.
        let pix = from_rows(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
        let mut pm = pix.to_mut();
        pm.set_pixel(1, 1, 90).unwrap();
        let out = box_blur(&pm.into(), 3, 3).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(40));
    }

    #[test]
    fn test_horizontal_only() {
        let pix = from_rows(&[&[0, 30, 60, 90]]);
        let out = box_blur(&pix, 3, 1).unwrap();
        // reflect101: [30 | 0 30 60 90 | 60]
        assert_eq!(out.get_pixel(0, 0), Some(20));
        assert_eq!(out.get_pixel(1, 0), Some(30));
        assert_eq!(out.get_pixel(3, 0), Some(70));
    }

    #[test]
    fn test_rgb_per_channel() {
        let mut pm = Pix::new(3, 3, PixelDepth::Bit32).unwrap().into_mut();
        for y in 0..3 {
            for x in 0..3 {
                pm.set_rgb(x, y, 200, 0, 9).unwrap();
            }
        }
        let out = box_blur(&pm.into(), 3, 3).unwrap();
        assert_eq!(out.get_rgb(1, 1), Some((200, 0, 9)));
    }

    #[test]
    fn test_zero_kernel_rejected() {
        let pix = from_rows(&[&[1, 2]]);
        assert!(box_blur(&pix, 0, 3).is_err());
    }
}
