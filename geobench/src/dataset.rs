//! Dataset construction from a directory of labeled images
//!
//! Ground truth lives in the filenames: `<index>_<label1>_<label2>.<ext>`,
//! e.g. `7_america_usa_unitedstates.jpg` accepts "america", "usa", and
//! "unitedstates". The external evaluation runner consumes this dataset;
//! the reporting pipeline only joins back to it via filenames.

use std::path::{Path, PathBuf};

/// Image file extensions recognized as dataset members.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// One dataset sample: an image and its acceptable labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoSample {
    pub filename: String,
    pub image_path: PathBuf,
    pub targets: Vec<String>,
}

/// Error type for dataset construction
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("image directory not found: {0}")]
    NotFound(String),

    #[error("no image files found in {0} (png, jpg, jpeg, webp)")]
    Empty(String),

    #[error("bad filename {0:?} (need at least two '_' delimited parts)")]
    BadFilename(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse the acceptable labels out of an image filename.
pub fn labels_from_filename(filename: &str) -> Result<Vec<String>, DatasetError> {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 2 || parts[1].is_empty() {
        return Err(DatasetError::BadFilename(filename.to_string()));
    }

    Ok(parts[1..].iter().map(|p| p.to_string()).collect())
}

/// Build the dataset from every recognized image in `image_dir`, in
/// lexicographic filename order.
pub fn dataset_from_dir(image_dir: impl AsRef<Path>) -> Result<Vec<GeoSample>, DatasetError> {
    let image_dir = image_dir.as_ref();
    if !image_dir.is_dir() {
        return Err(DatasetError::NotFound(image_dir.display().to_string()));
    }

    let mut images = Vec::new();
    for entry in std::fs::read_dir(image_dir)? {
        let entry = entry?;
        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        if path.is_file() && ext.as_deref().map_or(false, |e| IMAGE_EXTENSIONS.contains(&e)) {
            images.push(path);
        }
    }
    images.sort();

    if images.is_empty() {
        return Err(DatasetError::Empty(image_dir.display().to_string()));
    }

    let mut samples = Vec::with_capacity(images.len());
    for image_path in images {
        let filename = image_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let targets = labels_from_filename(&filename)?;
        samples.push(GeoSample {
            filename,
            image_path,
            targets,
        });
    }

    Ok(samples)
}
