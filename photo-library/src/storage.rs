//! Storage strategies for writing an encoded image into the photo library.

use crate::codec::encode_image;
use crate::error::{LibraryResult, PhotoLibraryError};
use crate::models::{LibraryConfig, Locator, PhotoFormat};
use crate::platform::{absolute_dir, ContentEntry, Platform, PlatformCapabilities};
use image::DynamicImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// How an image reaches the photo library
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageStrategy {
    /// Register an entry with the platform content index and stream into it.
    /// The index takes care of making the image visible to gallery apps.
    ManagedIndex { album: String },
    /// Write a file into a public directory. Gallery apps only see it after
    /// the indexer has been notified.
    DirectFile { dir: PathBuf },
}

impl StorageStrategy {
    pub fn select(capabilities: PlatformCapabilities, config: &LibraryConfig) -> Self {
        if capabilities.managed_index_available {
            StorageStrategy::ManagedIndex {
                album: config.album.clone(),
            }
        } else {
            StorageStrategy::DirectFile {
                dir: config.pictures_dir.clone(),
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StorageStrategy::ManagedIndex { .. } => "managed-index",
            StorageStrategy::DirectFile { .. } => "direct-file",
        }
    }

    /// Whether a successful write still needs an indexer notification
    pub fn needs_index_notification(&self) -> bool {
        matches!(self, StorageStrategy::DirectFile { .. })
    }

    pub fn write<P: Platform + ?Sized>(
        &self,
        platform: &P,
        img: &DynamicImage,
        file_name: &str,
        format: PhotoFormat,
        quality: u8,
    ) -> LibraryResult<Locator> {
        match self {
            StorageStrategy::ManagedIndex { album } => {
                write_managed(platform, album, img, file_name, format, quality)
            }
            StorageStrategy::DirectFile { dir } => {
                write_direct(dir, img, file_name, format, quality)
            }
        }
    }
}

fn write_managed<P: Platform + ?Sized>(
    platform: &P,
    album: &str,
    img: &DynamicImage,
    file_name: &str,
    format: PhotoFormat,
    quality: u8,
) -> LibraryResult<Locator> {
    let entry = ContentEntry {
        display_name: file_name.to_string(),
        mime_type: format.mime_type().to_string(),
        relative_path: album.to_string(),
    };

    let uri = platform.insert_content_entry(&entry)?.ok_or_else(|| {
        PhotoLibraryError::ContentRegistration(format!(
            "no locator returned for {}",
            file_name
        ))
    })?;
    log::debug!("Registered content entry {} for {}", uri, file_name);

    if let Err(e) = stream_into_entry(platform, &uri, img, format, quality) {
        log::error!("Writing into {} failed: {}", uri, e);
        match platform.delete_content_entry(&uri) {
            Ok(_) => log::debug!("Discarded content entry {}", uri),
            Err(del) => log::warn!("Could not discard content entry {}: {}", uri, del),
        }
        return Err(e);
    }

    Ok(Locator::Content(uri))
}

// The output stream is dropped (and thereby closed) on every return path.
fn stream_into_entry<P: Platform + ?Sized>(
    platform: &P,
    uri: &str,
    img: &DynamicImage,
    format: PhotoFormat,
    quality: u8,
) -> LibraryResult<()> {
    let mut out = platform.open_content_output(uri)?;
    encode_image(img, format, quality, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_direct(
    dir: &Path,
    img: &DynamicImage,
    file_name: &str,
    format: PhotoFormat,
    quality: u8,
) -> LibraryResult<Locator> {
    if !dir.exists() {
        log::debug!("Creating pictures directory {:?}", dir);
        std::fs::create_dir_all(dir)?;
    }

    let path = absolute_dir(dir).join(file_name);
    if let Err(e) = write_file(&path, img, format, quality) {
        log::error!("Writing {:?} failed: {}", path, e);
        if path.exists() {
            if let Err(rm) = std::fs::remove_file(&path) {
                log::warn!("Could not remove partial file {:?}: {}", path, rm);
            }
        }
        return Err(e);
    }

    Ok(Locator::File(path))
}

fn write_file(path: &Path, img: &DynamicImage, format: PhotoFormat, quality: u8) -> LibraryResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    encode_image(img, format, quality, &mut writer)?;
    writer.flush()?;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    // Outcome is already decided; a failed sync is only worth a log line.
    if let Err(e) = file.sync_all() {
        log::warn!("Could not sync {:?}: {}", path, e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_follows_capability() {
        let config = LibraryConfig {
            album: "Pictures/Receipts".into(),
            pictures_dir: PathBuf::from("/sdcard/Pictures"),
            ..LibraryConfig::default()
        };

        let managed = StorageStrategy::select(
            PlatformCapabilities {
                managed_index_available: true,
                permission_enforced: false,
            },
            &config,
        );
        assert_eq!(
            managed,
            StorageStrategy::ManagedIndex {
                album: "Pictures/Receipts".into()
            }
        );
        assert!(!managed.needs_index_notification());

        let direct = StorageStrategy::select(PlatformCapabilities::default(), &config);
        assert_eq!(
            direct,
            StorageStrategy::DirectFile {
                dir: PathBuf::from("/sdcard/Pictures")
            }
        );
        assert!(direct.needs_index_notification());
    }

    #[test]
    fn test_direct_write_creates_missing_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("Pictures");
        let img = DynamicImage::new_rgb8(3, 3);

        let locator = write_direct(&dir, &img, "a.png", PhotoFormat::Png, 100).unwrap();
        let path = locator.as_path().unwrap();
        assert_eq!(path, dir.join("a.png"));
        assert!(path.exists());
    }
}
