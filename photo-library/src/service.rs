use crate::codec::decode_image;
use crate::error::{LibraryResult, PhotoLibraryError};
use crate::models::{LibraryConfig, RemoveRequest, SaveRequest, SavedImage};
use crate::naming::file_name_now;
use crate::permission::{Admission, GateState, GrantResult, PermissionGate, Resolution};
use crate::platform::Platform;
use crate::remover::remove_image;
use crate::storage::StorageStrategy;
use std::sync::{Mutex, MutexGuard};

/// Receives the outcome of a save, exactly once
pub type SaveResponder = Box<dyn FnOnce(LibraryResult<SavedImage>) + Send>;

/// What `save` did with the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDisposition {
    /// The responder has already been called
    Completed,
    /// Waiting for the platform's permission callback
    AwaitingPermission,
}

struct PendingSave {
    request: SaveRequest,
    responder: SaveResponder,
}

/// Photo library service
///
/// Owns the permission gate and its single pending slot. The platform may
/// deliver permission results on another thread, so the gate sits behind a
/// mutex; it is never held while writing or while calling a responder.
pub struct PhotoSaver<P: Platform> {
    platform: P,
    config: LibraryConfig,
    gate: Mutex<PermissionGate<PendingSave>>,
}

impl<P: Platform> PhotoSaver<P> {
    pub fn new(platform: P, config: LibraryConfig) -> Self {
        Self {
            platform,
            config,
            gate: Mutex::new(PermissionGate::new()),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn gate_state(&self) -> GateState {
        self.lock_gate().state()
    }

    /// Whether a save is parked waiting for the permission callback
    pub fn has_pending(&self) -> bool {
        self.lock_gate().has_pending()
    }

    fn lock_gate(&self) -> MutexGuard<'_, PermissionGate<PendingSave>> {
        self.gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Saves an image, asking for the storage permission first if needed.
    ///
    /// When authorized the write happens within this call. Otherwise the
    /// request replaces whatever was parked before and `responder` fires
    /// from [`on_permission_result`](Self::on_permission_result).
    pub fn save(&self, request: SaveRequest, responder: SaveResponder) -> SaveDisposition {
        let capabilities = self.platform.capabilities();
        let held = capabilities.permission_enforced && self.platform.has_storage_permission();

        let admission = self.lock_gate().admit(
            PendingSave { request, responder },
            capabilities.permission_enforced,
            held,
        );

        match admission {
            Admission::Proceed(pending) => {
                let result = self.write_now(&pending.request);
                (pending.responder)(result);
                SaveDisposition::Completed
            }
            Admission::Deferred {
                superseded,
                request_permission,
            } => {
                if let Some(old) = superseded {
                    (old.responder)(Err(PhotoLibraryError::Superseded));
                }
                if request_permission {
                    log::debug!("Requesting storage permission");
                    self.platform.request_storage_permission();
                }
                SaveDisposition::AwaitingPermission
            }
        }
    }

    /// Resumes the parked save with the user's answer.
    ///
    /// Returns whether a pending request was resolved.
    pub fn on_permission_result(&self, results: &[GrantResult]) -> bool {
        let resolution = self.lock_gate().resolve(results);
        match resolution {
            Resolution::Granted(pending) => {
                let result = self.write_now(&pending.request);
                (pending.responder)(result);
                true
            }
            Resolution::Denied(pending) => {
                (pending.responder)(Err(PhotoLibraryError::PermissionDenied));
                true
            }
            Resolution::NothingPending => false,
        }
    }

    /// Awaits the outcome of [`save`](Self::save), including a permission round trip.
    pub async fn save_async(&self, request: SaveRequest) -> LibraryResult<SavedImage> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.save(
            request,
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
        );
        // The sender only disappears without a value if the saver is dropped
        // while the request is parked.
        rx.await.unwrap_or(Err(PhotoLibraryError::Superseded))
    }

    /// Decodes, names and writes the image, skipping the permission gate.
    pub fn write_now(&self, request: &SaveRequest) -> LibraryResult<SavedImage> {
        let img = decode_image(&request.image_data)?;

        let file_name = file_name_now(&request.name_prefix, request.format);
        let strategy = StorageStrategy::select(self.platform.capabilities(), &self.config);
        log::debug!(
            "Saving {} via {} (quality {})",
            file_name,
            strategy.name(),
            request.quality
        );

        let locator = strategy.write(
            &self.platform,
            &img,
            &file_name,
            request.format,
            request.quality,
        )?;

        if request.notify_indexer && strategy.needs_index_notification() {
            self.platform.notify_new_media(&locator);
        }

        log::debug!("Image saved at {}", locator);
        Ok(SavedImage {
            locator,
            file_name,
            mime_type: request.format.mime_type().to_string(),
        })
    }

    /// Deletes a previously saved image. Not gated by the permission.
    pub fn remove(&self, request: &RemoveRequest) -> LibraryResult<String> {
        remove_image(&self.platform, request)
    }
}
