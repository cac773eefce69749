//! Sample image catalog
//!
//! A catalog root holds one subdirectory per sample kind, each with image
//! files named by sample id:
//!
//! ```text
//! samples/
//!   glioma/08540.jpg
//!   meningioma/01234.png
//! ```
//!
//! Entries are sorted by kind then name, so indices are stable across runs.

use crate::{IoError, IoResult, read_image};
use pdilab_core::{ImageFormat, Pix};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A decoded sample together with its catalog identity
#[derive(Debug, Clone)]
pub struct Sample {
    /// File stem of the image (e.g. `"08540"`)
    pub name: String,
    /// Name of the directory the image was found in
    pub kind: String,
    /// The decoded image
    pub pix: Pix,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    kind: String,
    path: PathBuf,
}

/// Catalog of sample images under a root directory
#[derive(Debug, Clone)]
pub struct SampleSet {
    root: PathBuf,
    entries: Vec<Entry>,
}

impl SampleSet {
    /// Scan `root` for `<kind>/<name>.<ext>` images.
    ///
    /// Files whose extension is not a readable image format are skipped,
    /// as are files directly under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::EmptyCatalog`] when no images are found.
    pub fn open<P: AsRef<Path>>(root: P) -> IoResult<Self> {
        let root = root.as_ref().to_path_buf();
        let mut entries = Vec::new();

        for kind_dir in fs::read_dir(&root)? {
            let kind_dir = kind_dir?;
            if !kind_dir.file_type()?.is_dir() {
                continue;
            }
            let kind = kind_dir.file_name().to_string_lossy().into_owned();
            for file in fs::read_dir(kind_dir.path())? {
                let path = file?.path();
                let is_image = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(ImageFormat::from_extension)
                    .is_some_and(|f| f != ImageFormat::Unknown);
                let stem = path.file_stem().and_then(|s| s.to_str());
                if let (true, Some(stem)) = (is_image && path.is_file(), stem) {
                    entries.push(Entry {
                        name: stem.to_string(),
                        kind: kind.clone(),
                        path: path.clone(),
                    });
                }
            }
        }

        if entries.is_empty() {
            return Err(IoError::EmptyCatalog(root));
        }
        entries.sort_by(|a, b| (&a.kind, &a.name).cmp(&(&b.kind, &b.name)));
        info!(root = %root.display(), count = entries.len(), "opened sample catalog");
        Ok(Self { root, entries })
    }

    /// Root directory of the catalog
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no samples (never true for an opened set)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sample names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Load the sample called `name`.
    ///
    /// If several kinds hold the same name the first in catalog order wins.
    pub fn load(&self, name: &str) -> IoResult<Sample> {
        let index = self
            .entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| IoError::SampleNotFound(name.to_string()))?;
        self.load_index(index)
    }

    /// Load the sample at catalog position `index`.
    pub fn load_index(&self, index: usize) -> IoResult<Sample> {
        let entry = self.entries.get(index).ok_or_else(|| {
            IoError::SampleNotFound(format!("index {} of {}", index, self.entries.len()))
        })?;
        debug!(name = %entry.name, kind = %entry.kind, "loading sample");
        Ok(Sample {
            name: entry.name.clone(),
            kind: entry.kind.clone(),
            pix: read_image(&entry.path)?,
        })
    }

    /// Load a uniformly chosen sample.
    pub fn load_random(&self) -> IoResult<Sample> {
        let index = rand::random_range(0..self.entries.len());
        self.load_index(index)
    }
}
