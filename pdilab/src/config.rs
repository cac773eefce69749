//! Pipeline configuration.
//!
//! Both configurations deserialize from JSON with every field optional;
//! missing fields take the defaults below.

use crate::{PipelineError, PipelineResult};
use pdilab_color::ThresholdType;
use pdilab_core::ImageFormat;
use pdilab_region::ConnectivityType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn load_json<T: DeserializeOwned>(path: &Path) -> PipelineResult<T> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Settings for the smoothing contact sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Keep every n-th row and column before blurring.
    pub subsample_factor: u32,
    /// Square box kernel sizes, one blurred tile each.
    pub kernel_sizes: Vec<u32>,
    /// Tiles per contact-sheet row.
    pub columns: usize,
    /// Where the sheet is written.
    pub output: PathBuf,
    /// Display window title.
    pub title: String,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            subsample_factor: 2,
            kernel_sizes: vec![3, 5, 7, 9, 11],
            columns: 2,
            output: PathBuf::from("img_geradas/suavizacao_GaussianBlur.jpg"),
            title: "Imagens suavisadas (Blur)".to_string(),
        }
    }
}

impl SmoothingConfig {
    /// Load from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        load_json(path.as_ref())
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.subsample_factor == 0 {
            return Err(PipelineError::Config("subsample_factor must be >= 1".into()));
        }
        if self.kernel_sizes.is_empty() {
            return Err(PipelineError::Config("kernel_sizes is empty".into()));
        }
        if self.kernel_sizes.contains(&0) {
            return Err(PipelineError::Config("kernel sizes must be >= 1".into()));
        }
        if self.columns == 0 {
            return Err(PipelineError::Config("columns must be >= 1".into()));
        }
        let tiles = self.kernel_sizes.len() + 1;
        if tiles % self.columns != 0 {
            return Err(PipelineError::Config(format!(
                "{tiles} tiles (original + {} blurred) do not fill rows of {}",
                self.kernel_sizes.len(),
                self.columns
            )));
        }
        Ok(())
    }
}

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPoint {
    pub x: u32,
    pub y: u32,
}

/// A crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FromStr for CropRect {
    type Err = String;

    /// Parse `x,y,width,height`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("bad crop {s:?}: {e}"))?;
        match parts[..] {
            [x, y, width, height] => Ok(Self {
                x,
                y,
                width,
                height,
            }),
            _ => Err(format!("crop needs x,y,width,height, got {s:?}")),
        }
    }
}

impl FromStr for SeedPoint {
    type Err = String;

    /// Parse `x,y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("seed needs x,y, got {s:?}"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| format!("bad seed {s:?}: {e}"))
        };
        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}

/// Which side of the cutoff the threshold step zeroes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdRule {
    /// Keep values above the cutoff, zero the rest.
    #[default]
    KeepAbove,
    /// Zero values above the cutoff, pass the rest through.
    ZeroAbove,
}

impl ThresholdRule {
    pub fn threshold_type(self) -> ThresholdType {
        match self {
            Self::ZeroAbove => ThresholdType::ToZeroInv,
            Self::KeepAbove => ThresholdType::ToZero,
        }
    }
}

impl FromStr for ThresholdRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero-above" => Ok(Self::ZeroAbove),
            "keep-above" => Ok(Self::KeepAbove),
            _ => Err(format!("threshold rule must be zero-above or keep-above, got {s:?}")),
        }
    }
}

/// File format for written outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpg,
    Png,
    Pnm,
}

impl OutputFormat {
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Pnm => ImageFormat::Pnm,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ImageFormat::from_extension(s) {
            ImageFormat::Jpeg => Ok(Self::Jpg),
            ImageFormat::Png => Ok(Self::Png),
            ImageFormat::Pnm => Ok(Self::Pnm),
            ImageFormat::Unknown => Err(format!("format must be jpg, png or pnm, got {s:?}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.image_format().extension())
    }
}

/// Settings for the segmentation experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Reduce color input to 8 bpp gray first.
    pub to_gray: bool,
    /// Region of the sample to keep before processing.
    pub crop: Option<CropRect>,
    /// Center of the gray-tone cross and flood-fill seed.
    pub seed: SeedPoint,
    /// Arm length of the sampling cross.
    pub cross_half: u32,
    /// Gaussian kernel size (odd).
    pub blur_ksize: u32,
    /// Gaussian sigma, derived from the size when not positive.
    pub blur_sigma: f64,
    /// Flood-fill tolerance around the seed value.
    pub tolerance: u32,
    /// Flood-fill neighborhood, 4 or 8.
    pub connectivity: u32,
    /// Value painted into the flood-filled region.
    pub fill_value: u32,
    /// Threshold level.
    pub cutoff: u32,
    /// Threshold convention.
    pub threshold_rule: ThresholdRule,
    /// Directory receiving the named outputs.
    pub output_dir: PathBuf,
    /// Format of the named outputs.
    pub format: OutputFormat,
    /// Output name of the composited region.
    pub segmented_name: String,
    /// Output name of the (cropped) input.
    pub original_name: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            to_gray: true,
            crop: None,
            seed: SeedPoint { x: 50, y: 50 },
            cross_half: 4,
            blur_ksize: 3,
            blur_sigma: 0.0,
            tolerance: 10,
            connectivity: 8,
            fill_value: 255,
            cutoff: 254,
            threshold_rule: ThresholdRule::default(),
            output_dir: PathBuf::from("img_geradas"),
            format: OutputFormat::default(),
            segmented_name: "Segmentada".to_string(),
            original_name: "Original".to_string(),
        }
    }
}

impl SegmentationConfig {
    /// Load from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        load_json(path.as_ref())
    }

    /// Flood-fill connectivity as a typed value.
    pub fn connectivity_type(&self) -> PipelineResult<ConnectivityType> {
        ConnectivityType::from_neighbors(self.connectivity)
            .map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> PipelineResult<()> {
        self.connectivity_type()?;
        if self.blur_ksize % 2 == 0 {
            return Err(PipelineError::Config(format!(
                "blur_ksize must be odd, got {}",
                self.blur_ksize
            )));
        }
        if self.fill_value > 255 || self.cutoff > 255 {
            return Err(PipelineError::Config(format!(
                "fill_value {} and cutoff {} must be in 0..=255",
                self.fill_value, self.cutoff
            )));
        }
        if let Some(crop) = self.crop
            && (crop.width == 0 || crop.height == 0)
        {
            return Err(PipelineError::Config("crop must be non-empty".into()));
        }
        if self.segmented_name.is_empty() || self.original_name.is_empty() {
            return Err(PipelineError::Config("output names must be non-empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        SmoothingConfig::default().validate().unwrap();
        SegmentationConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: SegmentationConfig =
            serde_json::from_str(r#"{"tolerance": 3, "threshold_rule": "zero-above"}"#).unwrap();
        assert_eq!(cfg.tolerance, 3);
        assert_eq!(cfg.threshold_rule, ThresholdRule::ZeroAbove);
        assert_eq!(cfg.seed, SeedPoint { x: 50, y: 50 });
        assert_eq!(cfg.format, OutputFormat::Jpg);

        let cfg: SmoothingConfig = serde_json::from_str(r#"{"columns": 3}"#).unwrap();
        assert_eq!(cfg.kernel_sizes, vec![3, 5, 7, 9, 11]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        let bad = SmoothingConfig {
            subsample_factor: 0,
            ..SmoothingConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = SmoothingConfig {
            kernel_sizes: vec![3, 5],
            ..SmoothingConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = SegmentationConfig {
            blur_ksize: 4,
            ..SegmentationConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = SegmentationConfig {
            connectivity: 6,
            ..SegmentationConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_parse_cli_values() {
        assert_eq!(
            "1, 2,30,40".parse::<CropRect>().unwrap(),
            CropRect {
                x: 1,
                y: 2,
                width: 30,
                height: 40
            }
        );
        assert!("1,2,3".parse::<CropRect>().is_err());
        assert_eq!("7,9".parse::<SeedPoint>().unwrap(), SeedPoint { x: 7, y: 9 });
        assert!("7".parse::<SeedPoint>().is_err());
        assert_eq!("png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("jpeg".parse::<OutputFormat>().unwrap().to_string(), "jpg");
        assert_eq!(
            "zero-above".parse::<ThresholdRule>().unwrap().threshold_type(),
            ThresholdType::ToZeroInv
        );
    }

    #[test]
    fn test_default_rule_keeps_above_cutoff() {
        let rule = SegmentationConfig::default().threshold_rule;
        assert_eq!(rule, ThresholdRule::KeepAbove);
        assert_eq!(rule.threshold_type(), ThresholdType::ToZero);
    }
}
