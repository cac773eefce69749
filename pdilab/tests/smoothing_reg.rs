//! Smoothing contact sheet regression test
//!
//! The sheet of a synthetic image must have the `3H x 2W` layout of the
//! subsampled input, and every tile must match an independent box blur.

use pdilab::filter::box_blur;
use pdilab::smoothing::contact_sheet;
use pdilab::{ImageFormat, Pix, PixelDepth, SmoothingConfig};
use pdilab_test::RegParams;

fn stripes(w: u32, h: u32) -> Pix {
    let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().into_mut();
    for y in 0..h {
        for x in 0..w {
            let v = if (x / 6) % 2 == 0 { 30 } else { 220 };
            pm.set_pixel_unchecked(x, y, v + (y % 5));
        }
    }
    pm.into()
}

#[test]
fn smoothing_reg() {
    let mut rp = RegParams::new("smoothing");
    let pixs = stripes(81, 60);
    let config = SmoothingConfig::default();

    let result = contact_sheet(&pixs, &config).expect("contact sheet");
    let (w, h) = (result.subsampled.width(), result.subsampled.height());
    eprintln!("  subsampled {w}x{h}, sheet {}x{}", result.sheet.width(), result.sheet.height());

    // --- Test 1: sheet layout ---
    rp.compare_values(41.0, w as f64, 0.0);
    rp.compare_values(30.0, h as f64, 0.0);
    rp.compare_values((2 * w) as f64, result.sheet.width() as f64, 0.0);
    rp.compare_values((3 * h) as f64, result.sheet.height() as f64, 0.0);
    rp.write_pix(&result.sheet, ImageFormat::Png).expect("write sheet");

    // --- Test 2: tiles in row-major order ---
    let first = result.sheet.clip_rectangle(0, 0, w, h).unwrap();
    rp.compare_pix(&result.subsampled, &first);
    for (i, &k) in config.kernel_sizes.iter().enumerate() {
        let slot = i as u32 + 1;
        let (col, row) = (slot % 2, slot / 2);
        let tile = result.sheet.clip_rectangle(col * w, row * h, w, h).unwrap();
        let expected = box_blur(&result.subsampled, k, k).unwrap();
        rp.compare_pix(&expected, &tile);
    }

    // --- Test 3: other column counts ---
    let three = SmoothingConfig {
        columns: 3,
        ..SmoothingConfig::default()
    };
    let sheet3 = contact_sheet(&pixs, &three).unwrap().sheet;
    rp.compare_values((3 * w) as f64, sheet3.width() as f64, 0.0);
    rp.compare_values((2 * h) as f64, sheet3.height() as f64, 0.0);

    let four = SmoothingConfig {
        columns: 4,
        ..SmoothingConfig::default()
    };
    rp.check(contact_sheet(&pixs, &four).is_err(), "incomplete row rejected");

    assert!(rp.cleanup(), "smoothing regression test failed");
}
