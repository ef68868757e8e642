/// Stable classification of library failures.
///
/// Hosts that used to parse the human-readable messages can match on this
/// instead; the message text itself is kept for compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    DecodeFailure,
    WriteFailure,
    PermissionDenied,
    Superseded,
}

/// Error type for photo library operations
#[derive(Debug)]
pub enum PhotoLibraryError {
    /// The save request carried no image payload
    MissingImageData,
    /// The remove request carried no path
    MissingFilename,
    /// The payload was not valid base64
    InvalidBase64(base64::DecodeError),
    /// The payload bytes are not a decodable image
    Decode(image::ImageError),
    /// The content index refused to register a new entry
    ContentRegistration(String),
    /// Encoding the image into the output stream failed
    Encode(image::ImageError),
    /// Filesystem or stream error while writing
    Io(std::io::Error),
    /// Deleting an existing file failed
    Remove(std::io::Error),
    /// The user denied the storage permission
    PermissionDenied,
    /// A newer save request replaced this one while it waited for permission
    Superseded,
}

impl PhotoLibraryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PhotoLibraryError::MissingImageData | PhotoLibraryError::MissingFilename => {
                ErrorKind::InvalidInput
            }
            PhotoLibraryError::InvalidBase64(_) | PhotoLibraryError::Decode(_) => {
                ErrorKind::DecodeFailure
            }
            PhotoLibraryError::ContentRegistration(_)
            | PhotoLibraryError::Encode(_)
            | PhotoLibraryError::Io(_)
            | PhotoLibraryError::Remove(_) => ErrorKind::WriteFailure,
            PhotoLibraryError::PermissionDenied => ErrorKind::PermissionDenied,
            PhotoLibraryError::Superseded => ErrorKind::Superseded,
        }
    }

    /// Message handed to the host callback.
    ///
    /// These strings are what existing JavaScript consumers of the plugin
    /// receive, so they must not change.
    pub fn callback_message(&self) -> String {
        match self {
            PhotoLibraryError::MissingImageData => "Missing base64 string".to_string(),
            PhotoLibraryError::MissingFilename => "Missing filename string".to_string(),
            PhotoLibraryError::InvalidBase64(_) | PhotoLibraryError::Decode(_) => {
                "The image could not be decoded".to_string()
            }
            PhotoLibraryError::ContentRegistration(_)
            | PhotoLibraryError::Encode(_)
            | PhotoLibraryError::Io(_) => "Error while saving image".to_string(),
            PhotoLibraryError::Remove(e) => e.to_string(),
            PhotoLibraryError::PermissionDenied => "Permissions denied".to_string(),
            PhotoLibraryError::Superseded => {
                "Save request superseded by a newer request".to_string()
            }
        }
    }
}

impl std::fmt::Display for PhotoLibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoLibraryError::MissingImageData => write!(f, "Missing base64 string"),
            PhotoLibraryError::MissingFilename => write!(f, "Missing filename string"),
            PhotoLibraryError::InvalidBase64(e) => write!(f, "Invalid base64 payload: {}", e),
            PhotoLibraryError::Decode(e) => write!(f, "The image could not be decoded: {}", e),
            PhotoLibraryError::ContentRegistration(msg) => {
                write!(f, "Content index registration failed: {}", msg)
            }
            PhotoLibraryError::Encode(e) => write!(f, "Image encode error: {}", e),
            PhotoLibraryError::Io(e) => write!(f, "IO error: {}", e),
            PhotoLibraryError::Remove(e) => write!(f, "Remove failed: {}", e),
            PhotoLibraryError::PermissionDenied => write!(f, "Permissions denied"),
            PhotoLibraryError::Superseded => {
                write!(f, "Save request superseded by a newer request")
            }
        }
    }
}

impl std::error::Error for PhotoLibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PhotoLibraryError::InvalidBase64(e) => Some(e),
            PhotoLibraryError::Decode(e) | PhotoLibraryError::Encode(e) => Some(e),
            PhotoLibraryError::Io(e) | PhotoLibraryError::Remove(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PhotoLibraryError {
    fn from(err: std::io::Error) -> Self {
        PhotoLibraryError::Io(err)
    }
}

impl From<base64::DecodeError> for PhotoLibraryError {
    fn from(err: base64::DecodeError) -> Self {
        PhotoLibraryError::InvalidBase64(err)
    }
}

/// Result type for photo library operations
pub type LibraryResult<T> = Result<T, PhotoLibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_group_causes() {
        assert_eq!(
            PhotoLibraryError::MissingFilename.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            PhotoLibraryError::ContentRegistration("null uri".into()).kind(),
            ErrorKind::WriteFailure
        );
        assert_eq!(
            PhotoLibraryError::PermissionDenied.kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_callback_messages_are_stable() {
        assert_eq!(
            PhotoLibraryError::MissingImageData.callback_message(),
            "Missing base64 string"
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(
            PhotoLibraryError::Io(io).callback_message(),
            "Error while saving image"
        );
        let rm = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert_eq!(PhotoLibraryError::Remove(rm).callback_message(), "read-only");
    }
}
