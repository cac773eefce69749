//! Seeded segmentation experiment
//!
//! A fixed chain over one 8 bpp image:
//!
//! 1. gray conversion and optional crop
//! 2. gray tone = max of a plus-shaped sample around the seed
//! 3. Gaussian blur
//! 4. tolerance flood fill from the seed with a sentinel value
//! 5. to-zero threshold at the cutoff, `maxval` = gray tone
//! 6. reclassification pass over the thresholded image
//! 7. the result selects pixels of the original via bitwise AND
//! 8. original and segmented image side by side

use crate::{PipelineError, PipelineResult, SegmentationConfig};
use pdilab_color::threshold;
use pdilab_core::{Pix, PixelDepth, max_of_samples};
use pdilab_filter::gaussian_blur;
use pdilab_io::write_named;
use pdilab_region::{FloodFillOptions, floodfill_tolerance};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Every intermediate image of [`segment`]
#[derive(Debug, Clone)]
pub struct SegmentationResult {
    /// Gray, cropped input
    pub original: Pix,
    /// Cross samples around the seed, vertical and horizontal arms interleaved
    pub samples: Vec<u32>,
    /// Maximum of `samples`
    pub gray_tone: u32,
    /// After Gaussian blur
    pub blurred: Pix,
    /// After flood fill
    pub filled: Pix,
    /// Number of pixels painted by the flood fill
    pub filled_count: u32,
    /// After thresholding
    pub thresholded: Pix,
    /// Output of [`reclassify`], used as the selector mask
    pub mask: Pix,
    /// `original AND original` where the mask is nonzero
    pub segmented: Pix,
    /// `[original | segmented]`
    pub side_by_side: Pix,
}

/// Counts from [`reclassify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reclassification {
    /// Pixels whose value was above the cutoff
    pub above: u64,
    /// Pixels at or below the cutoff
    pub below: u64,
}

/// Display title for a sample: `"Tumor {name}, {kind}"`.
pub fn title(name: &str, kind: &str) -> String {
    format!("Tumor {name}, {kind}")
}

/// Rebuild `pix` pixel by pixel, splitting on `cutoff`.
///
/// Pixels above the cutoff take the thresholded value and the others take
/// the thresholded value too, so the output always equals the input. The
/// pass is kept so its branch counts can be inspected; it is logged as a
/// no-op.
pub fn reclassify(pix: &Pix, cutoff: u32) -> PipelineResult<(Pix, Reclassification)> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(pdilab_core::Error::UnsupportedDepth(pix.depth().bits()).into());
    }

    let mut out = pix.create_template().into_mut();
    let mut counts = Reclassification::default();
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let val = pix.get_pixel_unchecked(x, y);
            if val > cutoff {
                counts.above += 1;
            } else {
                counts.below += 1;
            }
            out.set_pixel_unchecked(x, y, val);
        }
    }

    warn!(
        cutoff,
        above = counts.above,
        below = counts.below,
        "reclassification copies every pixel unchanged"
    );
    Ok((out.into(), counts))
}

fn prepare(pix: &Pix, config: &SegmentationConfig) -> PipelineResult<Pix> {
    let gray = if config.to_gray {
        pix.convert_to_gray()?
    } else if pix.depth() == PixelDepth::Bit8 {
        pix.clone()
    } else {
        return Err(PipelineError::Config(format!(
            "to_gray is off but the input is {} bpp",
            pix.depth().bits()
        )));
    };

    match config.crop {
        Some(c) => Ok(gray.clip_rectangle(c.x, c.y, c.width, c.height)?),
        None => Ok(gray),
    }
}

/// Run the segmentation experiment on one image.
pub fn segment(pix: &Pix, config: &SegmentationConfig) -> PipelineResult<SegmentationResult> {
    config.validate()?;
    let (sx, sy) = (config.seed.x, config.seed.y);

    let original = prepare(pix, config)?;
    info!(
        width = original.width(),
        height = original.height(),
        "prepared input"
    );

    let samples = original.sample_cross(sx, sy, config.cross_half)?;
    let gray_tone = max_of_samples(&samples)?;
    debug!(?samples, gray_tone, "cross samples");
    debug!(value = ?original.get_pixel(sx, sy), "seed before blur");

    let blurred = gaussian_blur(&original, config.blur_ksize, config.blur_sigma)?;
    debug!(value = ?blurred.get_pixel(sx, sy), "seed after blur");

    let options = FloodFillOptions::new(config.tolerance)
        .with_connectivity(config.connectivity_type()?);
    let mut painted = blurred.to_mut();
    let filled_count = floodfill_tolerance(&mut painted, sx, sy, config.fill_value, &options)?;
    let filled: Pix = painted.into();
    debug!(value = ?filled.get_pixel(sx, sy), "seed after flood fill");
    info!(filled_count, tolerance = config.tolerance, "flood fill");

    let rule = config.threshold_rule.threshold_type();
    let thresholded = threshold(&filled, config.cutoff, gray_tone, rule)?;
    info!(cutoff = config.cutoff, ?rule, "threshold");

    let (mask, _) = reclassify(&thresholded, config.cutoff)?;
    let segmented = original.and_masked(&mask)?;
    let side_by_side = Pix::concat_horizontal(&[&original, &segmented])?;
    info!(
        width = side_by_side.width(),
        height = side_by_side.height(),
        "segmentation done"
    );

    Ok(SegmentationResult {
        original,
        samples,
        gray_tone,
        blurred,
        filled,
        filled_count,
        thresholded,
        mask,
        segmented,
        side_by_side,
    })
}

impl SegmentationResult {
    /// Write the segmented and original images under `config.output_dir`.
    ///
    /// Returns the two paths, segmented first.
    pub fn write_outputs(&self, config: &SegmentationConfig) -> PipelineResult<(PathBuf, PathBuf)> {
        let format = config.format.image_format();
        let seg = write_named(&self.segmented, &config.output_dir, &config.segmented_name, format)?;
        let orig = write_named(&self.original, &config.output_dir, &config.original_name, format)?;
        info!(segmented = %seg.display(), original = %orig.display(), "wrote outputs");
        Ok((seg, orig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        assert_eq!(title("08540", "glioma"), "Tumor 08540, glioma");
    }

    #[test]
    fn test_reclassify_counts() {
        let mut pm = Pix::new(3, 1, PixelDepth::Bit8).unwrap().into_mut();
        pm.set_pixel(0, 0, 255).unwrap();
        pm.set_pixel(1, 0, 254).unwrap();
        let pix: Pix = pm.into();
        let (out, counts) = reclassify(&pix, 254).unwrap();
        assert!(out.equals(&pix));
        assert_eq!(counts, Reclassification { above: 1, below: 2 });
    }

    #[test]
    fn test_reclassify_rejects_color() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            reclassify(&pix, 254),
            Err(PipelineError::Core(pdilab_core::Error::UnsupportedDepth(32)))
        ));
    }

    #[test]
    fn test_color_input_without_gray_fails() {
        let pix = Pix::new(120, 120, PixelDepth::Bit32).unwrap();
        let config = SegmentationConfig {
            to_gray: false,
            ..SegmentationConfig::default()
        };
        assert!(segment(&pix, &config).is_err());
    }
}
