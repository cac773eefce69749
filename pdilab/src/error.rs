//! Error types for the pipelines

use thiserror::Error;

/// Errors raised by the smoothing and segmentation pipelines
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pdilab_core::Error),

    /// Image I/O error
    #[error("I/O error: {0}")]
    Io(#[from] pdilab_io::IoError),

    /// Filtering error
    #[error("filter error: {0}")]
    Filter(#[from] pdilab_filter::FilterError),

    /// Region growing error
    #[error("region error: {0}")]
    Region(#[from] pdilab_region::RegionError),

    /// Thresholding error
    #[error("color error: {0}")]
    Color(#[from] pdilab_color::ColorError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("cannot read config file: {0}")]
    ConfigFile(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("cannot parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
