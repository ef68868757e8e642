use photo_library::{ErrorKind, PhotoLibraryError};
use std::fmt;

/// Central error types for the gallery plugin
#[derive(Debug)]
pub enum PluginError {
    /// Error from the photo library (save, remove, permission)
    Library(PhotoLibraryError),
    /// Action arguments could not be read
    Arguments(String),
    /// Configuration file could not be parsed
    Config(toml::de::Error),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Host platform call failed (JNI and similar)
    Platform(String),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PluginError::Library(e) => write!(f, "{}", e),
            PluginError::Arguments(msg) => write!(f, "Invalid arguments: {}", msg),
            PluginError::Config(e) => write!(f, "Configuration error: {}", e),
            PluginError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            PluginError::Platform(msg) => write!(f, "Platform error: {}", msg),
        }
    }
}

impl std::error::Error for PluginError {}

// Conversions from other error types
impl From<PhotoLibraryError> for PluginError {
    fn from(e: PhotoLibraryError) -> Self {
        PluginError::Library(e)
    }
}

impl From<toml::de::Error> for PluginError {
    fn from(e: toml::de::Error) -> Self {
        PluginError::Config(e)
    }
}

impl From<std::io::Error> for PluginError {
    fn from(e: std::io::Error) -> Self {
        PluginError::Filesystem(e)
    }
}

impl PluginError {
    /// Stable kind for library errors, `None` for plugin-level failures
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            PluginError::Library(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Error string handed to the host callback
    pub fn user_message(&self) -> String {
        match self {
            PluginError::Library(e) => e.callback_message(),
            PluginError::Arguments(msg) => msg.clone(),
            PluginError::Config(_) => "Invalid plugin configuration".to_string(),
            PluginError::Filesystem(e) => e.to_string(),
            PluginError::Platform(msg) => msg.clone(),
        }
    }
}
