use crate::actions::{Action, ActionArgs};
use crate::callback::CallbackContext;
use crate::config::PluginConfig;
use crate::error::PluginError;
use crate::platform::{default_pictures_dir, DesktopPlatform};
use photo_library::{GrantResult, PhotoSaver, Platform, SaveDisposition};
use std::path::PathBuf;

/// Request code used for the storage permission dialog
pub const WRITE_PERM_REQUEST_CODE: i32 = 1;

/// Plugin entry point called by the host bridge
pub struct SaveImageGallery<P: Platform> {
    saver: PhotoSaver<P>,
    config: PluginConfig,
}

impl SaveImageGallery<DesktopPlatform> {
    pub fn desktop(config: PluginConfig) -> Self {
        Self::new(DesktopPlatform::new(), config, default_pictures_dir())
    }
}

#[cfg(target_os = "android")]
impl SaveImageGallery<crate::platform::AndroidPlatform> {
    pub fn android(config: PluginConfig) -> Result<Self, PluginError> {
        let platform = crate::platform::AndroidPlatform::new(&config)?;
        let pictures_dir = platform.pictures_dir();
        Ok(Self::new(platform, config, pictures_dir))
    }
}

impl<P: Platform> SaveImageGallery<P> {
    pub fn new(platform: P, config: PluginConfig, default_pictures_dir: PathBuf) -> Self {
        crate::logging::init_logging();
        let library_config = config.library_config(default_pictures_dir);
        log::debug!(
            "SaveImageGallery ready (album {:?}, pictures dir {:?})",
            library_config.album,
            library_config.pictures_dir
        );
        Self {
            saver: PhotoSaver::new(platform, library_config),
            config,
        }
    }

    pub fn saver(&self) -> &PhotoSaver<P> {
        &self.saver
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Dispatches a named action. Returns `false` for unknown actions so the
    /// bridge can report them as invalid.
    pub fn execute(
        &self,
        action: &str,
        args: ActionArgs,
        callback: Box<dyn CallbackContext>,
    ) -> bool {
        match Action::from_name(action) {
            Some(Action::RemoveImage) => {
                self.remove_image(&args, callback);
                true
            }
            Some(Action::SaveImage) => {
                self.save_image(&args, callback);
                true
            }
            None => {
                log::warn!("Unknown action {:?}", action);
                false
            }
        }
    }

    /// Like [`execute`](Self::execute) with the argument array as JSON text.
    pub fn execute_json(
        &self,
        action: &str,
        raw_args: &str,
        callback: Box<dyn CallbackContext>,
    ) -> bool {
        match ActionArgs::from_json(raw_args) {
            Ok(args) => self.execute(action, args, callback),
            Err(e) => {
                deliver(callback, Err(e));
                true
            }
        }
    }

    fn remove_image(&self, args: &ActionArgs, callback: Box<dyn CallbackContext>) {
        let request = args.remove_request();
        let result = self.saver.remove(&request).map_err(PluginError::from);
        deliver(callback, result);
    }

    fn save_image(&self, args: &ActionArgs, callback: Box<dyn CallbackContext>) {
        let request = args.save_request(self.config.quality_policy());
        let disposition = self.saver.save(
            request,
            Box::new(move |result| {
                let result = result
                    .map(|saved| saved.locator.to_string())
                    .map_err(PluginError::from);
                deliver(callback, result);
            }),
        );
        if disposition == SaveDisposition::AwaitingPermission {
            log::debug!("Requesting permissions for WRITE_EXTERNAL_STORAGE");
        }
    }

    /// Forwarded from the activity's `onRequestPermissionsResult`.
    pub fn on_request_permission_result(
        &self,
        request_code: i32,
        permissions: &[String],
        grant_results: &[i32],
    ) {
        if request_code != WRITE_PERM_REQUEST_CODE {
            log::debug!("Ignoring permission result for request code {}", request_code);
            return;
        }
        log::debug!("Permission result for {:?}: {:?}", permissions, grant_results);

        let results: Vec<GrantResult> = grant_results
            .iter()
            .map(|code| GrantResult::from_android_code(*code))
            .collect();
        self.saver.on_permission_result(&results);
    }
}

fn deliver(callback: Box<dyn CallbackContext>, result: Result<String, PluginError>) {
    match result {
        Ok(payload) => callback.success(payload),
        Err(e) => {
            log::warn!("Action failed: {}", e);
            callback.error(e.user_message());
        }
    }
}
