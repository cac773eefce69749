//! Mask operations for images
//!
//! Bitwise compositing through a selector mask, and building masks from
//! pixel values.

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Bitwise-AND the image with itself through a selector mask.
    ///
    /// Where the mask is selected the output holds `src & src` (the source
    /// pixel); everywhere else the output is 0. An 8 bpp mask selects on
    /// nonzero values, a 1 bpp mask on ON pixels. The mask must have the
    /// same width and height as the image.
    ///
    /// # Errors
    ///
    /// Returns an error if the sizes differ, the mask is 32 bpp, or the
    /// source is 1 bpp.
    pub fn and_masked(&self, mask: &Pix) -> Result<Pix> {
        if self.width() != mask.width() || self.height() != mask.height() {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                mask.width(),
                mask.height(),
            ));
        }
        if mask.depth() == PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(mask.depth().bits()));
        }
        if self.depth() == PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let mut out = self.create_template().into_mut();
        for y in 0..self.height() {
            for x in 0..self.width() {
                if mask.get_pixel_unchecked(x, y) != 0 {
                    let val = self.get_pixel_unchecked(x, y);
                    out.set_pixel_unchecked(x, y, val & val);
                }
            }
        }

        Ok(out.into())
    }

    /// Create a 1 bpp mask where pixels equal a given value.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 8 bpp.
    pub fn make_mask_from_val(&self, val: u32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let mut out = Pix::new(self.width(), self.height(), PixelDepth::Bit1)?.into_mut();
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.get_pixel_unchecked(x, y) == val {
                    out.set_pixel_unchecked(x, y, 1);
                }
            }
        }

        Ok(out.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Pix {
        let mut pm = Pix::new(6, 4, PixelDepth::Bit8).unwrap().into_mut();
        for y in 0..4 {
            for x in 0..6 {
                pm.set_pixel_unchecked(x, y, 10 * x + y);
            }
        }
        pm.into()
    }

    #[test]
    fn test_and_masked_selects_region() {
        let pix = gradient();
        let mut mask = Pix::new(6, 4, PixelDepth::Bit8).unwrap().into_mut();
        mask.set_pixel(2, 1, 1).unwrap();
        mask.set_pixel(5, 3, 255).unwrap();
        let out = pix.and_masked(&mask.into()).unwrap();
        assert_eq!(out.get_pixel(2, 1), Some(21));
        assert_eq!(out.get_pixel(5, 3), Some(53));
        assert_eq!(out.get_pixel(0, 0), Some(0));
        assert_eq!(out.get_pixel(4, 2), Some(0));
    }

    #[test]
    fn test_and_masked_binary_mask() {
        let pix = gradient();
        let mut mask = Pix::new(6, 4, PixelDepth::Bit1).unwrap().into_mut();
        mask.set_pixel(3, 3, 1).unwrap();
        let out = pix.and_masked(&mask.into()).unwrap();
        assert_eq!(out.get_pixel(3, 3), Some(33));
        assert_eq!(out.get_pixel(3, 2), Some(0));
    }

    #[test]
    fn test_and_masked_size_mismatch() {
        let pix = gradient();
        let mask = Pix::new(5, 4, PixelDepth::Bit8).unwrap();
        assert!(pix.and_masked(&mask).is_err());
    }

    #[test]
    fn test_mask_from_val() {
        let pix = gradient();
        let mask = pix.make_mask_from_val(21).unwrap();
        assert_eq!(mask.depth(), PixelDepth::Bit1);
        assert_eq!(mask.get_pixel(2, 1), Some(1));
        assert_eq!(mask.get_pixel(2, 2), Some(0));
    }
}
