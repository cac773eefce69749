//! Tolerance flood fill
//!
//! Grows a region from a seed over connected pixels whose values lie within
//! a tolerance band around the seed value. Membership is decided on the
//! source values before any pixel is painted, so a fill value that falls
//! inside the band cannot re-grow the region.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use pdilab_core::{Pix, PixMut, PixelDepth};
use std::collections::VecDeque;
use tracing::debug;

/// Options for tolerance flood fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloodFillOptions {
    /// Accept neighbors within `seed ± tolerance` (inclusive)
    pub tolerance: u32,
    /// Connectivity type (4-way or 8-way)
    pub connectivity: ConnectivityType,
}

impl FloodFillOptions {
    /// Create new options with the specified tolerance
    pub fn new(tolerance: u32) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// Visit the region as a row-major bitmap of `width * height` flags.
fn grow_region(
    width: u32,
    height: u32,
    seed_x: u32,
    seed_y: u32,
    options: &FloodFillOptions,
    value_at: impl Fn(u32, u32) -> u32,
) -> Vec<bool> {
    let seed = value_at(seed_x, seed_y);
    let lo = seed.saturating_sub(options.tolerance);
    let hi = seed.saturating_add(options.tolerance).min(255);
    let idx = |x: u32, y: u32| (y * width + x) as usize;

    let mut visited = vec![false; (width * height) as usize];
    let mut queue = VecDeque::new();
    visited[idx(seed_x, seed_y)] = true;
    queue.push_back((seed_x, seed_y));

    while let Some((x, y)) = queue.pop_front() {
        for &(dx, dy) in options.connectivity.offsets() {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if visited[idx(nx, ny)] {
                continue;
            }
            let v = value_at(nx, ny);
            if (lo..=hi).contains(&v) {
                visited[idx(nx, ny)] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    visited
}

fn check_input(
    depth: PixelDepth,
    width: u32,
    height: u32,
    seed_x: u32,
    seed_y: u32,
) -> RegionResult<()> {
    if depth != PixelDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8-bit",
            actual: depth.bits(),
        });
    }
    if seed_x >= width || seed_y >= height {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    }
    Ok(())
}

/// Compute the flood-fill region as a 1 bpp mask.
///
/// ON pixels are those connected to the seed (under the chosen
/// connectivity) whose value lies in `[seed - tol, seed + tol]`, clamped
/// to `0..=255`. The seed itself is always ON.
///
/// # Errors
///
/// Returns an error if the image is not 8 bpp or the seed is out of bounds.
pub fn floodfill_tolerance_mask(
    pix: &Pix,
    seed_x: u32,
    seed_y: u32,
    options: &FloodFillOptions,
) -> RegionResult<Pix> {
    let (w, h) = (pix.width(), pix.height());
    check_input(pix.depth(), w, h, seed_x, seed_y)?;

    let region = grow_region(w, h, seed_x, seed_y, options, |x, y| {
        pix.get_pixel_unchecked(x, y)
    });

    let mut mask = Pix::new(w, h, PixelDepth::Bit1)?.into_mut();
    for y in 0..h {
        for x in 0..w {
            if region[(y * w + x) as usize] {
                mask.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(mask.into())
}

/// Flood fill an 8 bpp image in place.
///
/// Paints every pixel of the tolerance region (see
/// [`floodfill_tolerance_mask`]) with `new_value` and returns the number of
/// pixels painted.
///
/// # Errors
///
/// Returns an error if the image is not 8 bpp, the seed is out of bounds,
/// or `new_value` exceeds 255.
pub fn floodfill_tolerance(
    pix: &mut PixMut,
    seed_x: u32,
    seed_y: u32,
    new_value: u32,
    options: &FloodFillOptions,
) -> RegionResult<u32> {
    let (w, h) = (pix.width(), pix.height());
    check_input(pix.depth(), w, h, seed_x, seed_y)?;
    if new_value > 255 {
        return Err(RegionError::InvalidParameters(format!(
            "fill value {new_value} does not fit 8 bpp"
        )));
    }

    let region = grow_region(w, h, seed_x, seed_y, options, |x, y| {
        pix.get_pixel_unchecked(x, y)
    });

    let mut filled = 0u32;
    for y in 0..h {
        for x in 0..w {
            if region[(y * w + x) as usize] {
                pix.set_pixel_unchecked(x, y, new_value);
                filled += 1;
            }
        }
    }

    debug!(
        seed_x,
        seed_y,
        new_value,
        tolerance = options.tolerance,
        filled,
        "flood fill"
    );
    Ok(filled)
}

/// Copy-and-fill variant of [`floodfill_tolerance`].
pub fn flood_fill(
    pix: &Pix,
    seed_x: u32,
    seed_y: u32,
    new_value: u32,
    options: &FloodFillOptions,
) -> RegionResult<Pix> {
    let mut out = pix.to_mut();
    floodfill_tolerance(&mut out, seed_x, seed_y, new_value, options)?;
    Ok(out.into())
}
