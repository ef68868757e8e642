use photo_library::{ContentEntry, ContentOutput, Locator, Platform, PlatformCapabilities};
use std::io;

/// Platform for desktop hosts and tests.
///
/// There is no content index and no runtime permission: every save is a
/// direct file write into the pictures directory.
#[derive(Debug, Clone, Default)]
pub struct DesktopPlatform;

impl DesktopPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for DesktopPlatform {
    fn capabilities(&self) -> PlatformCapabilities {
        PlatformCapabilities::default()
    }

    fn has_storage_permission(&self) -> bool {
        true
    }

    fn request_storage_permission(&self) {
        log::debug!("Storage permission is implicit on desktop");
    }

    fn insert_content_entry(&self, entry: &ContentEntry) -> io::Result<Option<String>> {
        log::warn!(
            "No content index on desktop, cannot register {}",
            entry.display_name
        );
        Ok(None)
    }

    fn open_content_output(&self, uri: &str) -> io::Result<ContentOutput> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("content output not available on desktop: {}", uri),
        ))
    }

    fn delete_content_entry(&self, uri: &str) -> io::Result<bool> {
        log::debug!("Ignoring content delete on desktop: {}", uri);
        Ok(false)
    }

    fn notify_new_media(&self, locator: &Locator) {
        // Desktop file managers pick up new files on their own
        log::debug!("New media at {}", locator);
    }
}
