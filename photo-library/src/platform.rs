//! Seams to the host platform.
//!
//! The library never talks to the operating system's media index or
//! permission subsystem directly. Hosts implement [`Platform`] (the plugin
//! crate ships desktop and Android implementations).

use crate::models::Locator;
use std::io::{self, Write};
use std::path::PathBuf;

/// Capability flags observed from the running platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformCapabilities {
    /// A content-registration API that indexes new images itself is available
    pub managed_index_available: bool,
    /// Writing to shared storage requires a runtime permission grant
    pub permission_enforced: bool,
}

impl PlatformCapabilities {
    /// Derives capabilities from an API level and the two version thresholds.
    pub fn from_api_level(level: u32, managed_index_min: u32, scoped_storage_min: u32) -> Self {
        Self {
            managed_index_available: level >= managed_index_min,
            permission_enforced: level < scoped_storage_min,
        }
    }
}

/// Metadata registered with a new managed-index entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub display_name: String,
    pub mime_type: String,
    /// Directory relative to shared storage, e.g. `Pictures`
    pub relative_path: String,
}

/// Output stream bound to a registered content entry
pub type ContentOutput = Box<dyn Write + Send>;

pub trait Platform: Send + Sync {
    fn capabilities(&self) -> PlatformCapabilities;

    /// Whether the storage write permission is currently held
    fn has_storage_permission(&self) -> bool;

    /// Starts an asynchronous permission request.
    ///
    /// The outcome must later be delivered to
    /// [`PhotoSaver::on_permission_result`](crate::PhotoSaver::on_permission_result).
    fn request_storage_permission(&self);

    /// Registers a new image entry. `Ok(None)` means the index refused it.
    fn insert_content_entry(&self, entry: &ContentEntry) -> io::Result<Option<String>>;

    /// Opens a writable stream for an entry returned by `insert_content_entry`.
    fn open_content_output(&self, uri: &str) -> io::Result<ContentOutput>;

    /// Deletes a content entry. Returns `false` when no such entry exists.
    fn delete_content_entry(&self, uri: &str) -> io::Result<bool>;

    /// Fire-and-forget hint that a new file appeared at `locator`
    fn notify_new_media(&self, locator: &Locator);
}

/// Absolute path for a directory that may be given relative to the working dir
pub fn absolute_dir(dir: &std::path::Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(dir))
            .unwrap_or_else(|_| dir.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_from_api_level() {
        let legacy = PlatformCapabilities::from_api_level(28, 29, 30);
        assert!(!legacy.managed_index_available);
        assert!(legacy.permission_enforced);

        let q = PlatformCapabilities::from_api_level(29, 29, 30);
        assert!(q.managed_index_available);
        assert!(q.permission_enforced);

        let r = PlatformCapabilities::from_api_level(30, 29, 30);
        assert!(r.managed_index_available);
        assert!(!r.permission_enforced);
    }
}
