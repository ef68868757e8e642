use crate::error::{LibraryResult, PhotoLibraryError};
use crate::models::{Locator, RemoveRequest};
use crate::platform::Platform;

/// Deletes a previously saved image.
///
/// Accepts a plain path or a locator string as returned by a save. A missing
/// file is not an error; the request path is echoed back either way.
pub fn remove_image<P: Platform + ?Sized>(
    platform: &P,
    request: &RemoveRequest,
) -> LibraryResult<String> {
    if request.path.is_empty() {
        return Err(PhotoLibraryError::MissingFilename);
    }

    match Locator::parse(&request.path) {
        Locator::Content(uri) => {
            let existed = platform
                .delete_content_entry(&uri)
                .map_err(PhotoLibraryError::Remove)?;
            log::debug!("Removed content entry {} (existed: {})", uri, existed);
        }
        Locator::File(path) => {
            if path.is_dir() {
                // Only an empty directory goes; anything with contents errors.
                std::fs::remove_dir(&path).map_err(PhotoLibraryError::Remove)?;
                log::debug!("Removed directory {:?}", path);
            } else if path.exists() {
                std::fs::remove_file(&path).map_err(PhotoLibraryError::Remove)?;
                log::debug!("Removed {:?}", path);
            } else {
                log::debug!("Nothing to remove at {:?}", path);
            }
        }
    }

    Ok(request.path.clone())
}
