//! pdilab-io - Image I/O for pdilab
//!
//! Supported formats:
//!
//! - PNG (feature `png-format`)
//! - JPEG (feature `jpeg`)
//! - PNM binary P4/P5/P6 (feature `pnm`)
//!
//! plus [`SampleSet`], a catalog of sample images laid out as
//! `<root>/<kind>/<name>.<ext>`.

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;
pub mod sample;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use pdilab_core::ImageFormat;
pub use sample::{Sample, SampleSet};

use pdilab_core::Pix;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read an image from a file path.
///
/// The format is detected from the file contents, not the extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);
    let pix = read_with_format(reader, format)?;
    debug!(
        path = %path.display(),
        ?format,
        width = pix.width(),
        height = pix.height(),
        depth = pix.depth().bits(),
        "read image"
    );
    Ok(pix)
}

/// Read an image from memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_with_format(Cursor::new(data), format)
}

fn read_with_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        other => Err(IoError::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Resolve `Unknown` to the format implied by the path's extension.
fn resolve_format(path: &Path, format: ImageFormat) -> IoResult<ImageFormat> {
    if format != ImageFormat::Unknown {
        return Ok(format);
    }
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ImageFormat::from_extension(ext) {
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(format!(
            "cannot infer format from {}",
            path.display()
        ))),
        fmt => Ok(fmt),
    }
}

/// Write an image to a file path.
///
/// Missing parent directories are created. Passing
/// [`ImageFormat::Unknown`] picks the format from the path's extension.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = resolve_format(path, format)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_with_format(pix, &mut writer, format)?;
    writer.flush()?;
    debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_with_format(pix, &mut buffer, format)?;
    Ok(buffer)
}

fn write_with_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer, jpeg::DEFAULT_QUALITY),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        other => Err(IoError::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Write `pix` as `<dir>/<name>.<ext>` and return the path written.
pub fn write_named<P: AsRef<Path>>(
    pix: &Pix,
    dir: P,
    name: &str,
    format: ImageFormat,
) -> IoResult<PathBuf> {
    if name.is_empty() {
        return Err(IoError::InvalidData("output name is empty".to_string()));
    }
    if format == ImageFormat::Unknown {
        return Err(IoError::UnsupportedFormat(
            "named outputs need an explicit format".to_string(),
        ));
    }
    let path = dir
        .as_ref()
        .join(format!("{}.{}", name, format.extension()));
    write_image(pix, &path, format)?;
    Ok(path)
}
