//! Image concatenation and tiling
//!
//! Horizontal and vertical stacking of equally sized images, and a
//! row-major tiler that composes a contact sheet from a list of images.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

fn check_depths(images: &[&Pix]) -> Result<()> {
    let first = images[0];
    for pix in &images[1..] {
        if pix.depth() != first.depth() {
            return Err(Error::IncompatibleDepths(
                first.depth().bits(),
                pix.depth().bits(),
            ));
        }
    }
    Ok(())
}

fn blit(dst: &mut PixMut, src: &Pix, x0: u32, y0: u32) {
    for y in 0..src.height() {
        for x in 0..src.width() {
            dst.set_pixel_unchecked(x0 + x, y0 + y, src.get_pixel_unchecked(x, y));
        }
    }
}

impl Pix {
    /// Place images side by side, left to right.
    ///
    /// All images must share height and depth.
    pub fn concat_horizontal(images: &[&Pix]) -> Result<Pix> {
        if images.is_empty() {
            return Err(Error::NullInput("no images to concatenate"));
        }
        check_depths(images)?;

        let first = images[0];
        let h = first.height();
        for pix in &images[1..] {
            if pix.height() != h {
                return Err(Error::IncompatibleSizes(
                    first.width(),
                    h,
                    pix.width(),
                    pix.height(),
                ));
            }
        }

        let total_w: u32 = images.iter().map(|p| p.width()).sum();
        let mut out = Pix::new(total_w, h, first.depth())?.into_mut();
        out.set_spp(first.spp());

        let mut x0 = 0;
        for pix in images {
            blit(&mut out, pix, x0, 0);
            x0 += pix.width();
        }

        Ok(out.into())
    }

    /// Stack images top to bottom.
    ///
    /// All images must share width and depth.
    pub fn concat_vertical(images: &[&Pix]) -> Result<Pix> {
        if images.is_empty() {
            return Err(Error::NullInput("no images to concatenate"));
        }
        check_depths(images)?;

        let first = images[0];
        let w = first.width();
        for pix in &images[1..] {
            if pix.width() != w {
                return Err(Error::IncompatibleSizes(
                    w,
                    first.height(),
                    pix.width(),
                    pix.height(),
                ));
            }
        }

        let total_h: u32 = images.iter().map(|p| p.height()).sum();
        let mut out = Pix::new(w, total_h, first.depth())?.into_mut();
        out.set_spp(first.spp());

        let mut y0 = 0;
        for pix in images {
            blit(&mut out, pix, 0, y0);
            y0 += pix.height();
        }

        Ok(out.into())
    }

    /// Arrange images in rows of `columns`, row-major.
    ///
    /// Each row is built with [`Pix::concat_horizontal`] and the rows are
    /// then stacked with [`Pix::concat_vertical`]. The number of images must
    /// be a non-zero multiple of `columns`.
    pub fn tile(images: &[&Pix], columns: usize) -> Result<Pix> {
        if columns == 0 {
            return Err(Error::InvalidParameter("columns must be >= 1".into()));
        }
        if images.is_empty() {
            return Err(Error::NullInput("no images to tile"));
        }
        if images.len() % columns != 0 {
            return Err(Error::InvalidParameter(format!(
                "{} images do not fill rows of {columns}",
                images.len()
            )));
        }

        let rows = images
            .chunks(columns)
            .map(Pix::concat_horizontal)
            .collect::<Result<Vec<_>>>()?;
        let row_refs: Vec<&Pix> = rows.iter().collect();
        Pix::concat_vertical(&row_refs)
    }
}
