//! Boundary to the external OCR engine.
//!
//! Engines are blocking and are driven from a blocking worker by the
//! extraction coordinator. They return recognized fragments in reading
//! order; fragments are joined with a single separator before repair.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ExtractError, ExtractResult, OcrError};

/// Image bytes loaded from the asset directory under a logical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl ImageAsset {
    /// Loads `<dir>/<name>.<ext>` for the first extension that exists.
    ///
    /// Missing and zero-length files are treated alike.
    pub fn load(dir: &Path, name: &str, extensions: &[String]) -> ExtractResult<Self> {
        for extension in extensions {
            let path = dir.join(format!("{name}.{extension}"));
            let Ok(bytes) = fs::read(&path) else {
                continue;
            };
            if bytes.is_empty() {
                debug!(path = %path.display(), "skipping empty image asset");
                continue;
            }
            debug!(path = %path.display(), bytes = bytes.len(), "image asset loaded");
            return Ok(Self {
                name: name.to_owned(),
                path,
                bytes,
            });
        }
        Err(ExtractError::ImageLoad {
            name: name.to_owned(),
        })
    }

    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            path: PathBuf::new(),
            bytes,
        }
    }
}

/// Text recognizer: image in, fragments in reading order out.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &ImageAsset) -> Result<Vec<String>, OcrError>;
}

/// Joins recognized fragments into one raw transcription.
#[must_use]
pub fn join_fragments(fragments: &[String], separator: &str) -> String {
    fragments.join(separator)
}

/// Engine returning a fixed transcription regardless of the image.
#[derive(Debug, Clone, Default)]
pub struct StaticTextOcr {
    fragments: Vec<String>,
}

impl StaticTextOcr {
    #[must_use]
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }
}

impl OcrEngine for StaticTextOcr {
    fn recognize(&self, _image: &ImageAsset) -> Result<Vec<String>, OcrError> {
        Ok(self.fragments.clone())
    }
}

/// Replays a saved transcription stored next to the image as `<stem>.txt`.
///
/// Each non-empty line of the transcript is one fragment.
#[derive(Debug, Clone, Default)]
pub struct SidecarTextOcr;

impl SidecarTextOcr {
    #[must_use]
    pub fn transcript_path(image: &ImageAsset) -> PathBuf {
        image.path.with_extension("txt")
    }
}

impl OcrEngine for SidecarTextOcr {
    fn recognize(&self, image: &ImageAsset) -> Result<Vec<String>, OcrError> {
        let path = Self::transcript_path(image);
        let text = fs::read_to_string(&path)
            .map_err(|e| OcrError::new(format!("cannot read {}: {e}", path.display())))?;
        Ok(text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect())
    }
}
