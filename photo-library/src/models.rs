use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output encodings supported by the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhotoFormat {
    Jpeg,
    Png,
}

impl PhotoFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "jpeg",
            PhotoFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "image/jpeg",
            PhotoFormat::Png => "image/png",
        }
    }
}

impl Default for PhotoFormat {
    fn default() -> Self {
        PhotoFormat::Jpeg
    }
}

/// Raw image payload as received from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageData {
    /// Base64 text, optionally wrapped in a `data:` URL
    Base64(String),
    /// Already-decoded encoded image bytes (PNG, JPEG, WebP)
    Bytes(Vec<u8>),
}

impl ImageData {
    pub fn is_empty(&self) -> bool {
        match self {
            ImageData::Base64(s) => s.trim().is_empty(),
            ImageData::Bytes(b) => b.is_empty(),
        }
    }
}

/// A normalized request to store one image in the photo library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub image_data: ImageData,
    /// Concatenated as-is in front of the timestamp, may be empty
    pub name_prefix: String,
    /// Ask the system indexer to pick up directly written files
    pub notify_indexer: bool,
    pub format: PhotoFormat,
    /// Always within 1..=100 once normalized
    pub quality: u8,
}

/// Where a saved image ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locator {
    /// Content URI handed out by the managed index
    Content(String),
    /// Absolute path of a directly written file
    File(PathBuf),
}

impl Locator {
    /// Parses a locator string as produced by `Display`, or a bare path.
    pub fn parse(raw: &str) -> Locator {
        if raw.starts_with("content://") {
            Locator::Content(raw.to_string())
        } else if let Some(path) = raw.strip_prefix("file://") {
            Locator::File(PathBuf::from(path))
        } else {
            Locator::File(PathBuf::from(raw))
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Locator::File(path) => Some(path),
            Locator::Content(_) => None,
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Content(uri) => write!(f, "{}", uri),
            Locator::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedImage {
    pub locator: Locator,
    pub file_name: String,
    pub mime_type: String,
}

/// Request to delete a previously saved image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveRequest {
    pub path: String,
}

impl RemoveRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// What to do with quality values above 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityPolicy {
    /// Values above 100 become 100
    Clamp,
    /// Values above 100 are handed to the encoder unchanged (capped at `u8::MAX`)
    PassThrough,
}

/// Configuration for photo library initialization
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Relative directory registered with managed-index entries
    pub album: String,
    /// Target directory for direct file writes
    pub pictures_dir: PathBuf,
    pub quality_policy: QualityPolicy,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            album: "Pictures".to_string(),
            pictures_dir: PathBuf::from("./Pictures"),
            quality_policy: QualityPolicy::Clamp,
        }
    }
}
