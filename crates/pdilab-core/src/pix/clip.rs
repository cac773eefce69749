//! Clipping and subsampling
//!
//! Rectangle extraction (crop) and integer-factor subsampling.

use super::Pix;
use crate::error::{Error, Result};

impl Pix {
    /// Extract a rectangular region.
    ///
    /// The rectangle is clipped to the image bounds, so a region that
    /// hangs off the right or bottom edge yields a smaller image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the rectangle is empty or lies
    /// entirely outside the image.
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Pix> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle must be non-empty, got {w}x{h}"
            )));
        }
        if x >= self.width() || y >= self.height() {
            return Err(Error::InvalidParameter(format!(
                "clip origin ({x}, {y}) outside {}x{} image",
                self.width(),
                self.height()
            )));
        }

        let cw = w.min(self.width() - x);
        let ch = h.min(self.height() - y);
        let mut out = Pix::new(cw, ch, self.depth())?.into_mut();
        out.set_spp(self.spp());
        out.set_informat(self.informat());

        for dy in 0..ch {
            for dx in 0..cw {
                let val = self.get_pixel_unchecked(x + dx, y + dy);
                out.set_pixel_unchecked(dx, dy, val);
            }
        }

        Ok(out.into())
    }

    /// Keep every `factor`-th row and column, starting at (0, 0).
    ///
    /// The output is `ceil(w / factor) x ceil(h / factor)`. A factor of 1
    /// returns a shared clone.
    pub fn subsample(&self, factor: u32) -> Result<Pix> {
        if factor == 0 {
            return Err(Error::InvalidParameter(
                "subsample factor must be >= 1".into(),
            ));
        }
        if factor == 1 {
            return Ok(self.clone());
        }

        let wd = self.width().div_ceil(factor);
        let hd = self.height().div_ceil(factor);
        let mut out = Pix::new(wd, hd, self.depth())?.into_mut();
        out.set_spp(self.spp());

        for y in 0..hd {
            for x in 0..wd {
                let val = self.get_pixel_unchecked(x * factor, y * factor);
                out.set_pixel_unchecked(x, y, val);
            }
        }

        Ok(out.into())
    }
}
