//! Host plugin that saves base64 encoded images into the device photo gallery.
//!
//! The bridge calls [`SaveImageGallery::execute`] with one of two actions:
//!
//! - `saveImageDataToLibrary` `[base64, prefix, mediaScannerEnabled, format, quality]`
//!   answers with the locator of the saved image
//! - `removeImageFromLibrary` `[path]` answers with the removed path
//!
//! On Android versions that need `WRITE_EXTERNAL_STORAGE`, a save waits for
//! the permission dialog; the host forwards the activity's permission result
//! to [`SaveImageGallery::on_request_permission_result`].

pub mod actions;
pub mod callback;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod plugin;

pub use actions::{Action, ActionArgs, REMOVE_IMAGE_ACTION, SAVE_BASE64_ACTION};
pub use callback::{CallbackContext, FnCallback};
pub use config::PluginConfig;
pub use error::PluginError;
pub use logging::init_logging;
pub use plugin::{SaveImageGallery, WRITE_PERM_REQUEST_CODE};
