//! Image comparison operations
//!
//! - Pixel equality checks
//! - Pixel difference counting

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Result of counting pixel differences between two images
#[derive(Debug, Clone)]
pub struct PixelDiffResult {
    /// Number of pixels that differ
    pub n_diff: u64,
    /// Fraction of pixels that differ (0.0 to 1.0)
    pub fract_diff: f64,
    /// Maximum per-sample difference value
    pub max_diff: u32,
}

fn sample_diff(depth: PixelDepth, a: u32, b: u32) -> u32 {
    match depth {
        PixelDepth::Bit32 => {
            let (r1, g1, b1) = color::extract_rgb(a);
            let (r2, g2, b2) = color::extract_rgb(b);
            (r1.abs_diff(r2))
                .max(g1.abs_diff(g2))
                .max(b1.abs_diff(b2)) as u32
        }
        _ => a.abs_diff(b),
    }
}

impl Pix {
    /// Count the number of pixels that differ between two images.
    ///
    /// For 32 bpp images only the RGB samples are compared and `max_diff`
    /// is the largest single-channel difference.
    ///
    /// # Errors
    ///
    /// Returns error if images have different dimensions or depths.
    pub fn count_pixel_diffs(&self, other: &Pix) -> Result<PixelDiffResult> {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }
        if self.depth() != other.depth() {
            return Err(Error::IncompatibleDepths(
                self.depth().bits(),
                other.depth().bits(),
            ));
        }

        let depth = self.depth();
        let mut n_diff = 0u64;
        let mut max_diff = 0u32;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let d = sample_diff(
                    depth,
                    self.get_pixel_unchecked(x, y),
                    other.get_pixel_unchecked(x, y),
                );
                if d != 0 {
                    n_diff += 1;
                    max_diff = max_diff.max(d);
                }
            }
        }

        let total = self.width() as f64 * self.height() as f64;
        Ok(PixelDiffResult {
            n_diff,
            fract_diff: n_diff as f64 / total,
            max_diff,
        })
    }

    /// Check if two images are exactly equal.
    ///
    /// Images of different size or depth are never equal.
    pub fn equals(&self, other: &Pix) -> bool {
        self.count_pixel_diffs(other)
            .map(|r| r.n_diff == 0)
            .unwrap_or(false)
    }
}
