//! Convolution operations
//!
//! Generic 2D and separable convolution with reflect-101 borders, and the
//! Gaussian blur built on the separable path. Intermediate sums are kept in
//! floating point and rounded once, to nearest, when written back to 8 bits.

use crate::border::reflect101;
use crate::{FilterError, FilterResult, Kernel};
use pdilab_core::pix::RgbComponent;
use pdilab_core::{Pix, PixelDepth};
use tracing::trace;

fn check_gray(pix: &Pix) -> FilterResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8-bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

#[inline]
fn to_u8(val: f64) -> u32 {
    val.round_ties_even().clamp(0.0, 255.0) as u32
}

/// Apply `filter` to each of R, G, B and merge the results.
fn per_channel<F>(pix: &Pix, filter: F) -> FilterResult<Pix>
where
    F: Fn(&Pix) -> FilterResult<Pix>,
{
    let r = filter(&pix.get_rgb_component(RgbComponent::Red)?)?;
    let g = filter(&pix.get_rgb_component(RgbComponent::Green)?)?;
    let b = filter(&pix.get_rgb_component(RgbComponent::Blue)?)?;
    Ok(Pix::create_rgb_image(&r, &g, &b)?)
}

/// Convolve an 8 bpp image with a 2D kernel.
///
/// The kernel is applied as a correlation around its center; values are
/// not renormalized.
pub fn convolve_gray(pix: &Pix, kernel: &Kernel) -> FilterResult<Pix> {
    check_gray(pix)?;

    let w = pix.width();
    let h = pix.height();
    let kw = kernel.width();
    let kh = kernel.height();
    let cx = kernel.center_x() as i64;
    let cy = kernel.center_y() as i64;
    let weights = kernel.data();

    let mut out = Pix::new(w, h, PixelDepth::Bit8)?.into_mut();
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0f64;
            for ky in 0..kh {
                let sy = reflect101(y as i64 + ky as i64 - cy, h);
                for kx in 0..kw {
                    let sx = reflect101(x as i64 + kx as i64 - cx, w);
                    let wgt = weights[(ky * kw + kx) as usize] as f64;
                    sum += wgt * pix.get_pixel_unchecked(sx, sy) as f64;
                }
            }
            out.set_pixel_unchecked(x, y, to_u8(sum));
        }
    }

    Ok(out.into())
}

/// Convolve an 8 or 32 bpp image with a 2D kernel.
///
/// 32 bpp images are convolved per channel.
pub fn convolve(pix: &Pix, kernel: &Kernel) -> FilterResult<Pix> {
    match pix.depth() {
        PixelDepth::Bit8 => convolve_gray(pix, kernel),
        PixelDepth::Bit32 => per_channel(pix, |p| convolve_gray(p, kernel)),
        PixelDepth::Bit1 => Err(FilterError::UnsupportedDepth {
            expected: "8 or 32 bpp",
            actual: 1,
        }),
    }
}

/// Separable convolution of an 8 bpp image.
///
/// `kernel_x` must be a single row and `kernel_y` a single column. The
/// horizontal pass is kept in floating point so only the final result is
/// rounded.
pub fn convolve_sep_gray(pix: &Pix, kernel_x: &Kernel, kernel_y: &Kernel) -> FilterResult<Pix> {
    check_gray(pix)?;
    if kernel_x.height() != 1 || kernel_y.width() != 1 {
        return Err(FilterError::InvalidKernel(format!(
            "separable kernels must be 1xN and Nx1, got {}x{} and {}x{}",
            kernel_x.width(),
            kernel_x.height(),
            kernel_y.width(),
            kernel_y.height()
        )));
    }

    let w = pix.width();
    let h = pix.height();
    let cx = kernel_x.center_x() as i64;
    let cy = kernel_y.center_y() as i64;
    let wx = kernel_x.data();
    let wy = kernel_y.data();

    let mut tmp = vec![0.0f64; (w * h) as usize];
    for y in 0..h {
        for x in 0..w {
            let sum: f64 = wx
                .iter()
                .enumerate()
                .map(|(k, &wgt)| {
                    let sx = reflect101(x as i64 + k as i64 - cx, w);
                    wgt as f64 * pix.get_pixel_unchecked(sx, y) as f64
                })
                .sum();
            tmp[(y * w + x) as usize] = sum;
        }
    }

    let mut out = Pix::new(w, h, PixelDepth::Bit8)?.into_mut();
    for y in 0..h {
        for x in 0..w {
            let sum: f64 = wy
                .iter()
                .enumerate()
                .map(|(k, &wgt)| {
                    let sy = reflect101(y as i64 + k as i64 - cy, h);
                    wgt as f64 * tmp[(sy * w + x) as usize]
                })
                .sum();
            out.set_pixel_unchecked(x, y, to_u8(sum));
        }
    }

    Ok(out.into())
}

/// Separable convolution of an 8 or 32 bpp image.
pub fn convolve_sep(pix: &Pix, kernel_x: &Kernel, kernel_y: &Kernel) -> FilterResult<Pix> {
    match pix.depth() {
        PixelDepth::Bit8 => convolve_sep_gray(pix, kernel_x, kernel_y),
        PixelDepth::Bit32 => per_channel(pix, |p| convolve_sep_gray(p, kernel_x, kernel_y)),
        PixelDepth::Bit1 => Err(FilterError::UnsupportedDepth {
            expected: "8 or 32 bpp",
            actual: 1,
        }),
    }
}

/// Gaussian blur with a square `ksize x ksize` kernel.
///
/// A non-positive `sigma` is derived from `ksize` (see
/// [`Kernel::gaussian_1d`]). A `ksize` of 0 with positive sigma picks the
/// smallest odd size covering three sigma on each side.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] for an even `ksize`, or when both
/// `ksize` and `sigma` are non-positive.
pub fn gaussian_blur(pix: &Pix, ksize: u32, sigma: f64) -> FilterResult<Pix> {
    let ksize = match ksize {
        0 if sigma > 0.0 => ((sigma * 6.0 + 1.0).round() as u32) | 1,
        0 => {
            return Err(FilterError::InvalidKernel(
                "Gaussian blur needs a kernel size or a positive sigma".into(),
            ));
        }
        k => k,
    };
    let kx = Kernel::gaussian_1d(ksize, sigma)?;
    if ksize == 1 {
        return Ok(pix.deep_clone());
    }
    let ky = kx.transposed();
    trace!(ksize, sigma, weights = ?kx.data(), "gaussian kernel");
    convolve_sep(pix, &kx, &ky)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(w: u32, h: u32, x: u32, y: u32, val: u32) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().into_mut();
        pm.set_pixel(x, y, val).unwrap();
        pm.into()
    }

    #[test]
    fn test_gaussian_3x3_impulse_response() {
        let pix = impulse(5, 5, 2, 2, 160);
        let out = gaussian_blur(&pix, 3, 0.0).unwrap();
        // outer product of [1/4, 1/2, 1/4]
        assert_eq!(out.get_pixel(2, 2), Some(40));
        assert_eq!(out.get_pixel(1, 2), Some(20));
        assert_eq!(out.get_pixel(1, 1), Some(10));
        assert_eq!(out.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_gaussian_preserves_constant() {
        let mut pm = Pix::new(7, 6, PixelDepth::Bit8).unwrap().into_mut();
        pm.set_all(123);
        let pix: Pix = pm.into();
        for k in [3, 5, 7, 9] {
            let out = gaussian_blur(&pix, k, 0.0).unwrap();
            assert!(out.equals(&pix), "ksize {k}");
        }
    }

    #[test]
    fn test_gaussian_ksize_one_is_copy() {
        let pix = impulse(3, 3, 1, 1, 77);
        assert!(gaussian_blur(&pix, 1, 0.0).unwrap().equals(&pix));
    }

    #[test]
    fn test_gaussian_bad_params() {
        let pix = impulse(3, 3, 1, 1, 77);
        assert!(gaussian_blur(&pix, 4, 0.0).is_err());
        assert!(gaussian_blur(&pix, 0, 0.0).is_err());
        assert!(gaussian_blur(&pix, 0, 1.0).is_ok());
    }

    #[test]
    fn test_convolve_matches_separable() {
        let pix = impulse(6, 4, 0, 3, 200);
        let kx = Kernel::gaussian_1d(3, 0.0).unwrap();
        let k2 = Kernel::from_slice(
            3,
            3,
            &[
                0.0625, 0.125, 0.0625, 0.125, 0.25, 0.125, 0.0625, 0.125, 0.0625,
            ],
        )
        .unwrap();
        let sep = convolve_sep(&pix, &kx, &kx.transposed()).unwrap();
        let full = convolve(&pix, &k2).unwrap();
        assert!(sep.equals(&full));
    }

    #[test]
    fn test_sep_rejects_wrong_shape() {
        let pix = impulse(3, 3, 1, 1, 1);
        let kx = Kernel::gaussian_1d(3, 0.0).unwrap();
        assert!(convolve_sep(&pix, &kx, &kx).is_err());
    }
}
