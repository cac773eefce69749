//! Smoothing contact sheet
//!
//! The input is subsampled, box-blurred once per configured kernel size,
//! and the original plus every blurred variant are tiled row-major into a
//! single sheet.

use crate::{PipelineResult, SmoothingConfig};
use pdilab_core::Pix;
use pdilab_filter::box_blur;
use tracing::{debug, info};

/// Output of [`contact_sheet`]
#[derive(Debug, Clone)]
pub struct SmoothingResult {
    /// The subsampled input (first tile)
    pub subsampled: Pix,
    /// Blurred variants keyed by kernel size, in configuration order
    pub variants: Vec<(u32, Pix)>,
    /// All tiles arranged in rows of `columns`
    pub sheet: Pix,
}

/// Build the smoothing contact sheet.
///
/// With the default configuration an `H x W` subsampled input yields a
/// `3H x 2W` sheet: `[orig, k3]`, `[k5, k7]`, `[k9, k11]`.
pub fn contact_sheet(pix: &Pix, config: &SmoothingConfig) -> PipelineResult<SmoothingResult> {
    config.validate()?;

    let subsampled = pix.subsample(config.subsample_factor)?;
    info!(
        width = subsampled.width(),
        height = subsampled.height(),
        factor = config.subsample_factor,
        "subsampled input"
    );

    let variants = config
        .kernel_sizes
        .iter()
        .map(|&k| -> PipelineResult<(u32, Pix)> {
            let blurred = box_blur(&subsampled, k, k)?;
            if let Ok((_, var)) = blurred.mean_and_variance() {
                debug!(ksize = k, variance = var, "box blur");
            }
            Ok((k, blurred))
        })
        .collect::<PipelineResult<Vec<_>>>()?;

    let mut tiles: Vec<&Pix> = Vec::with_capacity(variants.len() + 1);
    tiles.push(&subsampled);
    tiles.extend(variants.iter().map(|(_, p)| p));
    let sheet = Pix::tile(&tiles, config.columns)?;
    info!(
        width = sheet.width(),
        height = sheet.height(),
        tiles = tiles.len(),
        "built contact sheet"
    );

    Ok(SmoothingResult {
        subsampled,
        variants,
        sheet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdilab_core::PixelDepth;

    #[test]
    fn test_default_sheet_layout() {
        let mut pm = Pix::new(9, 7, PixelDepth::Bit8).unwrap().into_mut();
        pm.set_all(50);
        let result = contact_sheet(&pm.into(), &SmoothingConfig::default()).unwrap();
        assert_eq!((result.subsampled.width(), result.subsampled.height()), (5, 4));
        assert_eq!((result.sheet.width(), result.sheet.height()), (10, 12));
        let sizes: Vec<u32> = result.variants.iter().map(|(k, _)| *k).collect();
        assert_eq!(sizes, vec![3, 5, 7, 9, 11]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let config = SmoothingConfig {
            columns: 4,
            ..SmoothingConfig::default()
        };
        assert!(contact_sheet(&pix, &config).is_err());
    }
}
