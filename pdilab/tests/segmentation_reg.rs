//! Segmentation regression test
//!
//! A flat disc on a flat background: the flood fill covers the disc, and
//! the two threshold conventions select either the disc or its complement.

use pdilab::segmentation::{reclassify, segment};
use pdilab::{ImageFormat, Pix, PixelDepth, SegmentationConfig, ThresholdRule};
use pdilab_test::RegParams;

const DISC: u32 = 150;
const BACKGROUND: u32 = 60;

fn disc(w: u32, h: u32, cx: i64, cy: i64, r: i64) -> Pix {
    let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().into_mut();
    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            let v = if dx * dx + dy * dy <= r * r {
                DISC
            } else {
                BACKGROUND
            };
            pm.set_pixel_unchecked(x, y, v);
        }
    }
    pm.into()
}

fn filled(w: u32, h: u32, val: u32) -> Pix {
    let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().into_mut();
    pm.set_all(val);
    pm.into()
}

#[test]
fn segmentation_reg() {
    let mut rp = RegParams::new("segmentation");
    let pixs = disc(120, 100, 50, 50, 20);

    // --- Test 1: reclassification is a strict identity ---
    let (same, counts) = reclassify(&pixs, 100).unwrap();
    rp.compare_pix(&pixs, &same);
    rp.compare_values((120 * 100) as f64, (counts.above + counts.below) as f64, 0.0);

    // --- Test 2: AND with full and empty masks ---
    let all = pixs.and_masked(&filled(120, 100, 255)).unwrap();
    rp.compare_pix(&pixs, &all);
    let none = pixs.and_masked(&filled(120, 100, 0)).unwrap();
    rp.compare_pix(&filled(120, 100, 0), &none);

    // --- Test 3: default rule keeps the filled region ---
    let config = SegmentationConfig::default();
    let result = segment(&pixs, &config).expect("segment");
    rp.compare_values(18.0, result.samples.len() as f64, 0.0);
    rp.compare_values(DISC as f64, result.gray_tone as f64, 0.0);
    rp.compare_values(255.0, result.filled.get_pixel(50, 50).unwrap() as f64, 0.0);
    rp.compare_values(DISC as f64, result.segmented.get_pixel(50, 50).unwrap() as f64, 0.0);
    rp.compare_values(0.0, result.segmented.get_pixel(5, 5).unwrap() as f64, 0.0);
    rp.compare_pix(&result.thresholded, &result.mask);
    rp.compare_values(240.0, result.side_by_side.width() as f64, 0.0);
    rp.compare_values(100.0, result.side_by_side.height() as f64, 0.0);
    rp.check(result.filled_count > 1000, "fill covers the disc interior");
    let selected = result.segmented.make_mask_from_val(DISC).unwrap();
    rp.compare_values(
        result.filled_count as f64,
        selected.count_pixels().unwrap() as f64,
        0.0,
    );
    rp.write_pix(&result.side_by_side, ImageFormat::Png).expect("write keep-above");
    let disc_count = result.filled_count;

    // --- Test 4: zero-above removes the filled region ---
    let zero = SegmentationConfig {
        threshold_rule: ThresholdRule::ZeroAbove,
        ..SegmentationConfig::default()
    };
    let result = segment(&pixs, &zero).expect("segment zero-above");
    rp.compare_values(0.0, result.segmented.get_pixel(50, 50).unwrap() as f64, 0.0);
    rp.compare_values(BACKGROUND as f64, result.segmented.get_pixel(5, 5).unwrap() as f64, 0.0);
    rp.write_pix(&result.side_by_side, ImageFormat::Png).expect("write zero-above");

    // --- Test 4b: saturated pixels outside the region are not counted ---
    let mut pm = pixs.to_mut();
    for y in 80..100 {
        for x in 100..120 {
            pm.set_pixel_unchecked(x, y, 255);
        }
    }
    let with_block: Pix = pm.into();
    let result = segment(&with_block, &config).expect("segment with block");
    rp.compare_values(disc_count as f64, result.filled_count as f64, 0.0);
    let saturated = result.filled.make_mask_from_val(255).unwrap().count_pixels().unwrap();
    rp.check(
        saturated > result.filled_count as u64,
        "pre-existing 255 block lies outside the painted count",
    );

    // --- Test 5: crop moves the seed frame ---
    let cropped = SegmentationConfig {
        crop: Some(pdilab::CropRect {
            x: 10,
            y: 10,
            width: 90,
            height: 80,
        }),
        seed: pdilab::SeedPoint { x: 40, y: 40 },
        ..SegmentationConfig::default()
    };
    let result = segment(&pixs, &cropped).expect("segment cropped");
    rp.compare_values(90.0, result.original.width() as f64, 0.0);
    rp.compare_values(DISC as f64, result.gray_tone as f64, 0.0);

    // --- Test 6: seed cross off the image ---
    let off = SegmentationConfig {
        seed: pdilab::SeedPoint { x: 118, y: 50 },
        ..SegmentationConfig::default()
    };
    rp.check(segment(&pixs, &off).is_err(), "cross past the edge rejected");

    assert!(rp.cleanup(), "segmentation regression test failed");
}

#[test]
fn gray_tone_reg() {
    let mut rp = RegParams::new("gray_tone");

    // Peak on the horizontal arm wins, a brighter pixel off the cross is ignored
    let mut pm = Pix::new(100, 100, PixelDepth::Bit8).unwrap().into_mut();
    pm.set_all(90);
    pm.set_pixel(53, 50, 200).unwrap();
    pm.set_pixel(53, 53, 250).unwrap();
    let pix: Pix = pm.into();
    let samples = pix.sample_cross(50, 50, 4).unwrap();
    rp.compare_values(18.0, samples.len() as f64, 0.0);
    rp.compare_values(200.0, pdilab::max_of_samples(&samples).unwrap() as f64, 0.0);

    // All-equal samples give that value
    let flat = filled(100, 100, 77);
    let samples = flat.sample_cross(50, 50, 4).unwrap();
    rp.compare_values(77.0, pdilab::max_of_samples(&samples).unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "gray tone regression test failed");
}
