//! pdilab-filter - Smoothing filters
//!
//! This crate provides the linear smoothing filters used by the pipelines:
//!
//! - Normalized box blur via integral images
//! - Gaussian blur (separable) with OpenCV-compatible kernel selection
//! - Generic 2D and separable convolution with arbitrary kernels
//!
//! All filters extend the image borders by reflect-101.

pub mod block_conv;
pub mod border;
pub mod convolve;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

pub use block_conv::box_blur;
pub use border::reflect101;
pub use convolve::{convolve, convolve_gray, convolve_sep, convolve_sep_gray, gaussian_blur};
