//! I/O regression test
//!
//! Writes synthetic images through every enabled codec, reads them back,
//! and exercises the sample catalog on a scratch directory tree.

use pdilab_core::{ImageFormat, Pix, PixelDepth};
use pdilab_io::{IoError, SampleSet, read_image, read_image_mem, write_image_mem, write_named};
use pdilab_test::RegParams;
use std::fs;
use std::path::PathBuf;

fn gray_ramp(w: u32, h: u32) -> Pix {
    let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().into_mut();
    for y in 0..h {
        for x in 0..w {
            pm.set_pixel_unchecked(x, y, (3 * x + 2 * y) % 256);
        }
    }
    pm.into()
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pdilab_io_reg_{}_{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn io_reg_lossless_formats() {
    let mut rp = RegParams::new("io_lossless");
    let pix = gray_ramp(37, 21);

    for format in [ImageFormat::Png, ImageFormat::Pnm] {
        let bytes = write_image_mem(&pix, format).unwrap();
        let back = read_image_mem(&bytes).unwrap();
        rp.compare_pix(&pix, &back);
        rp.check(back.informat() == format, "decoded format tag");
    }

    assert!(rp.cleanup());
}

#[test]
fn io_reg_write_named_creates_dir() {
    let mut rp = RegParams::new("io_named");
    let dir = scratch_dir("named").join("img_geradas");
    let pix = gray_ramp(16, 16);

    let path = write_named(&pix, &dir, "Segmentada", ImageFormat::Jpeg).unwrap();
    rp.check(path.ends_with("Segmentada.jpg"), "named path");
    let back = read_image(&path).unwrap();
    rp.compare_values(16.0, back.width() as f64, 0.0);
    rp.compare_values(16.0, back.height() as f64, 0.0);

    assert!(write_named(&pix, &dir, "", ImageFormat::Png).is_err());
    let _ = fs::remove_dir_all(dir.parent().unwrap());
    assert!(rp.cleanup());
}

#[test]
fn io_reg_sample_catalog() {
    let mut rp = RegParams::new("io_samples");
    let root = scratch_dir("samples");
    fs::create_dir_all(root.join("glioma")).unwrap();
    fs::create_dir_all(root.join("meningioma")).unwrap();

    let a = gray_ramp(8, 8);
    let b = gray_ramp(12, 6);
    pdilab_io::write_image(&a, root.join("glioma/08540.png"), ImageFormat::Png).unwrap();
    pdilab_io::write_image(&b, root.join("meningioma/00017.pgm"), ImageFormat::Pnm).unwrap();
    fs::write(root.join("glioma/notes.txt"), b"not an image").unwrap();
    fs::write(root.join("README"), b"top-level files are ignored").unwrap();

    let set = SampleSet::open(&root).unwrap();
    rp.compare_values(2.0, set.len() as f64, 0.0);
    rp.check(set.names().collect::<Vec<_>>() == ["08540", "00017"], "catalog order");

    let sample = set.load("08540").unwrap();
    rp.check(sample.kind == "glioma", "sample kind");
    rp.compare_pix(&a, &sample.pix);

    let sample = set.load_index(1).unwrap();
    rp.check(sample.name == "00017" && sample.kind == "meningioma", "indexed sample");

    let random = set.load_random().unwrap();
    rp.check(random.name == "08540" || random.name == "00017", "random sample");

    rp.check(
        matches!(set.load("99999"), Err(IoError::SampleNotFound(_))),
        "unknown name",
    );
    rp.check(set.load_index(2).is_err(), "index past end");

    let empty = scratch_dir("empty");
    fs::create_dir_all(empty.join("kind")).unwrap();
    rp.check(
        matches!(SampleSet::open(&empty), Err(IoError::EmptyCatalog(_))),
        "empty catalog",
    );

    let _ = fs::remove_dir_all(&root);
    let _ = fs::remove_dir_all(&empty);
    assert!(rp.cleanup());
}
