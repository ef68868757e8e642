mod desktop;

#[cfg(target_os = "android")]
mod android;

pub use desktop::DesktopPlatform;

#[cfg(target_os = "android")]
pub use android::AndroidPlatform;

use std::path::PathBuf;

/// Default directory for direct file writes on this platform
pub fn default_pictures_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        // Replaced by the public Pictures directory once the JVM is reachable
        PathBuf::from("/storage/emulated/0/Pictures")
    }

    #[cfg(not(target_os = "android"))]
    {
        dirs::picture_dir().unwrap_or_else(|| PathBuf::from("./Pictures"))
    }
}
