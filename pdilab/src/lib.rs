//! pdilab - Classical image processing demonstrations
//!
//! Two fixed pipelines over single still images, built on the workspace's
//! image crates:
//!
//! - [`smoothing::contact_sheet`] - subsample, box-blur at increasing
//!   kernel sizes, and tile the variants into a contact sheet
//! - [`segmentation::segment`] - cross-sample a gray tone, blur, flood fill
//!   from a seed, threshold, and composite the region over the original
//!
//! # Example
//!
//! ```
//! use pdilab::{Pix, PixelDepth, SmoothingConfig, smoothing};
//!
//! let pix = Pix::new(40, 30, PixelDepth::Bit8).unwrap();
//! let result = smoothing::contact_sheet(&pix, &SmoothingConfig::default()).unwrap();
//! assert_eq!(result.sheet.width(), 40);
//! assert_eq!(result.sheet.height(), 45);
//! ```

pub mod config;
mod error;
pub mod segmentation;
pub mod smoothing;

pub use config::{CropRect, OutputFormat, SeedPoint, SegmentationConfig, SmoothingConfig, ThresholdRule};
pub use error::{PipelineError, PipelineResult};

// Re-export core types (primary data structures used everywhere)
pub use pdilab_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pdilab_color as color;
pub use pdilab_filter as filter;
pub use pdilab_io as io;
pub use pdilab_region as region;
