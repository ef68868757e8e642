//! Format and quality normalization for incoming save requests.

use crate::models::{ImageData, PhotoFormat, QualityPolicy, SaveRequest};

/// Quality used when the caller passes zero or a negative value
pub const DEFAULT_QUALITY: u8 = 100;

/// Maps a requested format name onto a supported format.
///
/// Comparison is case-insensitive but exact otherwise. Anything unrecognized,
/// including the empty string or a padded name, falls back to JPEG.
pub fn normalize_format(requested: &str) -> PhotoFormat {
    match requested.to_ascii_uppercase().as_str() {
        "PNG" => PhotoFormat::Png,
        "JPG" | "JPEG" => PhotoFormat::Jpeg,
        other => {
            if !other.is_empty() {
                log::debug!("Unsupported format {:?}, using JPEG", requested);
            }
            PhotoFormat::Jpeg
        }
    }
}

/// Maps a requested quality onto an encoder quality.
pub fn normalize_quality(requested: i64, policy: QualityPolicy) -> u8 {
    if requested <= 0 {
        return DEFAULT_QUALITY;
    }
    match policy {
        QualityPolicy::Clamp => requested.min(100) as u8,
        QualityPolicy::PassThrough => requested.min(u8::MAX as i64) as u8,
    }
}

impl SaveRequest {
    /// Builds a request from loosely typed host arguments.
    pub fn from_raw(
        image_data: ImageData,
        name_prefix: impl Into<String>,
        notify_indexer: bool,
        format: &str,
        quality: i64,
        policy: QualityPolicy,
    ) -> Self {
        Self {
            image_data,
            name_prefix: name_prefix.into(),
            notify_indexer,
            format: normalize_format(format),
            quality: normalize_quality(quality, policy),
        }
    }
}
