//! Threshold regression test
//!
//! Runs every rule over a full 0..=255 ramp and checks the counts of
//! zeroed, kept, and saturated pixels.

use pdilab_color::{ThresholdType, threshold};
use pdilab_core::{Pix, PixelDepth};
use pdilab_test::RegParams;

fn full_ramp() -> Pix {
    let mut pm = Pix::new(256, 2, PixelDepth::Bit8).unwrap().into_mut();
    for y in 0..2 {
        for x in 0..256 {
            pm.set_pixel_unchecked(x, y, x);
        }
    }
    pm.into()
}

fn count_value(pix: &Pix, val: u32) -> u64 {
    pix.make_mask_from_val(val).unwrap().count_pixels().unwrap()
}

#[test]
fn threshold_reg() {
    let mut rp = RegParams::new("threshold");
    let ramp = full_ramp();

    // --- Binary family at t = 127 ---
    let bin = threshold(&ramp, 127, 200, ThresholdType::Binary).unwrap();
    rp.compare_values(256.0, count_value(&bin, 200) as f64, 0.0);
    rp.compare_values(256.0, count_value(&bin, 0) as f64, 0.0);
    let inv = threshold(&ramp, 127, 200, ThresholdType::BinaryInv).unwrap();
    rp.compare_values(256.0, count_value(&inv, 200) as f64, 0.0);

    // --- Trunc caps at t ---
    let trunc = threshold(&ramp, 100, 0, ThresholdType::Trunc).unwrap();
    rp.compare_values(2.0 * 156.0, count_value(&trunc, 100) as f64, 0.0);

    // --- To-zero pair at the segmentation cutoff ---
    let keep_above = threshold(&ramp, 254, 180, ThresholdType::ToZero).unwrap();
    rp.compare_values(2.0, count_value(&keep_above, 255) as f64, 0.0);
    rp.compare_values(2.0 * 255.0, count_value(&keep_above, 0) as f64, 0.0);

    let zero_above = threshold(&ramp, 254, 180, ThresholdType::ToZeroInv).unwrap();
    rp.compare_values(0.0, count_value(&zero_above, 255) as f64, 0.0);
    rp.compare_values(4.0, count_value(&zero_above, 0) as f64, 0.0);
    rp.compare_values(2.0, count_value(&zero_above, 254) as f64, 0.0);

    assert!(rp.cleanup(), "threshold regression test failed");
}
