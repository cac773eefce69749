//! pdilab-region - Region growing
//!
//! Tolerance flood fill on 8 bpp images, in place or as a 1 bpp mask.
//!
//! # Examples
//!
//! ```
//! use pdilab_core::{Pix, PixelDepth};
//! use pdilab_region::{FloodFillOptions, floodfill_tolerance};
//!
//! let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
//! let mut pix_mut = pix.try_into_mut().unwrap();
//!
//! // A flat image is one region
//! let count = floodfill_tolerance(&mut pix_mut, 5, 5, 255, &FloodFillOptions::new(10)).unwrap();
//! assert_eq!(count, 100);
//! ```

pub mod conncomp;
mod error;
pub mod seedfill;

pub use conncomp::ConnectivityType;
pub use error::{RegionError, RegionResult};
pub use seedfill::{FloodFillOptions, flood_fill, floodfill_tolerance, floodfill_tolerance_mask};
