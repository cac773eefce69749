//! RGB component operations
//!
//! Functions for extracting and composing individual color channels of
//! 32 bpp images, and for reducing color images to grayscale.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Color component selector for RGB channel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbComponent {
    /// Red channel (bits 24-31)
    Red,
    /// Green channel (bits 16-23)
    Green,
    /// Blue channel (bits 8-15)
    Blue,
    /// Alpha channel (bits 0-7)
    Alpha,
}

/// Luma weights in fixed point (x 2^14), matching the ITU-R BT.601 mix
/// `0.299 R + 0.587 G + 0.114 B`.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

impl Pix {
    /// Extract a single color component as an 8 bpp grayscale image.
    pub fn get_rgb_component(&self, comp: RgbComponent) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let w = self.width();
        let h = self.height();
        let mut result_mut = Pix::new(w, h, PixelDepth::Bit8)?.into_mut();

        for y in 0..h {
            for x in 0..w {
                let pixel = self.get_pixel_unchecked(x, y);
                let val = match comp {
                    RgbComponent::Red => color::red(pixel),
                    RgbComponent::Green => color::green(pixel),
                    RgbComponent::Blue => color::blue(pixel),
                    RgbComponent::Alpha => color::alpha(pixel),
                };
                result_mut.set_pixel_unchecked(x, y, val as u32);
            }
        }

        Ok(result_mut.into())
    }

    /// Create a 32 bpp RGB image from three 8 bpp component images.
    ///
    /// All three images must have the same dimensions.
    pub fn create_rgb_image(pix_r: &Pix, pix_g: &Pix, pix_b: &Pix) -> Result<Pix> {
        for pix in [pix_r, pix_g, pix_b] {
            if pix.depth() != PixelDepth::Bit8 {
                return Err(Error::UnsupportedDepth(pix.depth().bits()));
            }
        }

        let w = pix_r.width();
        let h = pix_r.height();
        if pix_g.width() != w || pix_g.height() != h || pix_b.width() != w || pix_b.height() != h {
            return Err(Error::InvalidParameter(
                "all component images must have the same dimensions".into(),
            ));
        }

        let mut result_mut = Pix::new(w, h, PixelDepth::Bit32)?.into_mut();

        for y in 0..h {
            for x in 0..w {
                let r = pix_r.get_pixel_unchecked(x, y) as u8;
                let g = pix_g.get_pixel_unchecked(x, y) as u8;
                let b = pix_b.get_pixel_unchecked(x, y) as u8;
                result_mut.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
            }
        }

        Ok(result_mut.into())
    }

    /// Convert to an 8 bpp grayscale image.
    ///
    /// 8 bpp input is returned as a shared clone. 32 bpp input is reduced
    /// with luma weights and rounded to nearest. 1 bpp input maps 1 to 255.
    pub fn convert_to_gray(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit8 => Ok(self.clone()),
            PixelDepth::Bit1 => {
                let w = self.width();
                let h = self.height();
                let mut out = Pix::new(w, h, PixelDepth::Bit8)?.into_mut();
                for y in 0..h {
                    for x in 0..w {
                        out.set_pixel_unchecked(x, y, self.get_pixel_unchecked(x, y) * 255);
                    }
                }
                Ok(out.into())
            }
            PixelDepth::Bit32 => {
                let w = self.width();
                let h = self.height();
                let mut out = Pix::new(w, h, PixelDepth::Bit8)?.into_mut();
                for y in 0..h {
                    for x in 0..w {
                        let (r, g, b) = color::extract_rgb(self.get_pixel_unchecked(x, y));
                        let luma = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
                        let val = (luma + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT;
                        out.set_pixel_unchecked(x, y, val.min(255));
                    }
                }
                Ok(out.into())
            }
        }
    }
}
