//! Image statistics operations
//!
//! - Pixel counting (for binary images)
//! - Mean and variance of gray images
//! - Cross-pattern neighborhood sampling

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Count the number of ON (foreground) pixels in a binary image.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 1 bpp.
    pub fn count_pixels(&self) -> Result<u64> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        Ok(self
            .data()
            .chunks(self.wpl() as usize)
            .map(|row| {
                let full = (self.width() / 32) as usize;
                let mut n: u64 = row[..full].iter().map(|w| w.count_ones() as u64).sum();
                let rem = self.width() % 32;
                if rem != 0 {
                    n += (row[full] >> (32 - rem)).count_ones() as u64;
                }
                n
            })
            .sum())
    }

    /// Mean and population variance of an 8 bpp image.
    pub fn mean_and_variance(&self) -> Result<(f64, f64)> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let mut sum = 0.0_f64;
        let mut sum_sq = 0.0_f64;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let v = self.get_pixel_unchecked(x, y) as f64;
                sum += v;
                sum_sq += v * v;
            }
        }
        let n = self.width() as f64 * self.height() as f64;
        let mean = sum / n;
        Ok((mean, (sum_sq / n - mean * mean).max(0.0)))
    }

    /// Sample a plus-shaped neighborhood around `(cx, cy)`.
    ///
    /// For each offset `d` in `-half..=half` the vertical arm value at
    /// `(cx, cy + d)` is pushed, followed by the horizontal arm value at
    /// `(cx + d, cy)`. The result has `2 * (2 * half + 1)` entries and the
    /// center pixel appears twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 8 bpp or any sample falls
    /// outside the image.
    pub fn sample_cross(&self, cx: u32, cy: u32, half: u32) -> Result<Vec<u32>> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let (cx, cy, half) = (cx as i64, cy as i64, half as i64);
        let width = self.width();
        let height = self.height();
        let fetch = |x: i64, y: i64| -> Result<u32> {
            if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                return Err(Error::PixelOutOfBounds {
                    x,
                    y,
                    width,
                    height,
                });
            }
            Ok(self.get_pixel_unchecked(x as u32, y as u32))
        };

        let mut samples = Vec::with_capacity((4 * half + 2) as usize);
        for d in -half..=half {
            samples.push(fetch(cx, cy + d)?);
            samples.push(fetch(cx + d, cy)?);
        }
        Ok(samples)
    }
}

/// Largest sampled value, used as the gray tone estimate of a region.
///
/// # Errors
///
/// Returns [`Error::NullInput`] for an empty slice.
pub fn max_of_samples(samples: &[u32]) -> Result<u32> {
    samples
        .iter()
        .copied()
        .max()
        .ok_or(Error::NullInput("no samples"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pixels_partial_word() {
        let mut pm = Pix::new(35, 2, PixelDepth::Bit1).unwrap().into_mut();
        pm.set_pixel(0, 0, 1).unwrap();
        pm.set_pixel(34, 0, 1).unwrap();
        pm.set_pixel(33, 1, 1).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.count_pixels().unwrap(), 3);
    }

    #[test]
    fn test_mean_and_variance_constant() {
        let mut pm = Pix::new(5, 5, PixelDepth::Bit8).unwrap().into_mut();
        pm.set_all(42);
        let (mean, var) = Pix::from(pm).mean_and_variance().unwrap();
        assert!((mean - 42.0).abs() < 1e-9);
        assert!(var.abs() < 1e-9);
    }

    #[test]
    fn test_sample_cross_order() {
        let mut pm = Pix::new(5, 5, PixelDepth::Bit8).unwrap().into_mut();
        for y in 0..5 {
            for x in 0..5 {
                pm.set_pixel_unchecked(x, y, 10 * y + x);
            }
        }
        let pix: Pix = pm.into();
        let samples = pix.sample_cross(2, 2, 1).unwrap();
        // (2,1) (1,2) (2,2) (2,2) (2,3) (3,2)
        assert_eq!(samples, vec![12, 21, 22, 22, 32, 23]);
    }

    #[test]
    fn test_sample_cross_out_of_bounds() {
        let pix = Pix::new(5, 5, PixelDepth::Bit8).unwrap();
        assert!(pix.sample_cross(1, 2, 2).is_err());
        assert!(pix.sample_cross(2, 2, 2).is_ok());
    }

    #[test]
    fn test_max_of_samples() {
        assert_eq!(max_of_samples(&[3, 9, 1]).unwrap(), 9);
        assert_eq!(max_of_samples(&[7; 18]).unwrap(), 7);
        assert!(max_of_samples(&[]).is_err());
    }
}
