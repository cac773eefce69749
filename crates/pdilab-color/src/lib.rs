//! pdilab-color - Intensity thresholding
//!
//! Fixed-level thresholding in the binary, truncate, and to-zero families
//! for 8 bpp images and per channel for 32 bpp images.

mod error;
pub mod threshold;

pub use error::{ColorError, ColorResult};
pub use threshold::{ThresholdType, threshold};
