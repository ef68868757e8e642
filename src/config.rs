use crate::error::PluginError;
use photo_library::{LibraryConfig, PlatformCapabilities, QualityPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// First API level with a scoped-storage `MediaStore` insert (Android 10)
pub const DEFAULT_MANAGED_INDEX_MIN_SDK: u32 = 29;
/// First API level where writing to shared storage needs no permission (Android 11)
pub const DEFAULT_SCOPED_STORAGE_MIN_SDK: u32 = 30;

/// Plugin settings, read from `save-image-gallery.toml` when present
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PluginConfig {
    /// Relative album directory for managed-index entries
    pub album: String,
    /// Override for the direct-write directory; platform default if unset
    pub pictures_dir: Option<PathBuf>,
    pub managed_index_min_sdk: u32,
    pub scoped_storage_min_sdk: u32,
    /// Clamp quality above 100 instead of passing it to the encoder
    pub clamp_quality: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            album: "Pictures".to_string(),
            pictures_dir: None,
            managed_index_min_sdk: DEFAULT_MANAGED_INDEX_MIN_SDK,
            scoped_storage_min_sdk: DEFAULT_SCOPED_STORAGE_MIN_SDK,
            clamp_quality: true,
        }
    }
}

impl PluginConfig {
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    pub fn quality_policy(&self) -> QualityPolicy {
        if self.clamp_quality {
            QualityPolicy::Clamp
        } else {
            QualityPolicy::PassThrough
        }
    }

    pub fn capabilities_for(&self, api_level: u32) -> PlatformCapabilities {
        PlatformCapabilities::from_api_level(
            api_level,
            self.managed_index_min_sdk,
            self.scoped_storage_min_sdk,
        )
    }

    /// Library configuration with `default_pictures_dir` used unless overridden
    pub fn library_config(&self, default_pictures_dir: PathBuf) -> LibraryConfig {
        LibraryConfig {
            album: self.album.clone(),
            pictures_dir: self.pictures_dir.clone().unwrap_or(default_pictures_dir),
            quality_policy: self.quality_policy(),
        }
    }
}
