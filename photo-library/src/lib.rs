//! # Photo Library
//!
//! Saves encoded images into the platform photo library.
//!
//! This crate provides the platform-independent part of saving a photo:
//! - Format and quality normalization
//! - Timestamped file naming
//! - Choosing between a managed content index and direct file writes
//! - Gating saves behind the storage permission, resuming after the grant
//! - Removing previously saved images
//!
//! ## Platform Separation
//!
//! Everything the operating system provides (content index, permission
//! dialogs, media scanner) is reached through the [`Platform`] trait. The
//! plugin crate implements it for Android and desktop.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_library::{ImageData, LibraryConfig, PhotoSaver, QualityPolicy, SaveRequest};
//!
//! let saver = PhotoSaver::new(platform, LibraryConfig::default());
//! let request = SaveRequest::from_raw(
//!     ImageData::Base64(payload),
//!     "img_",
//!     true,
//!     "PNG",
//!     0,
//!     QualityPolicy::Clamp,
//! );
//! saver.save(request, Box::new(|result| println!("{:?}", result)));
//! ```

pub mod codec;
pub mod error;
pub mod format;
pub mod models;
pub mod naming;
pub mod permission;
pub mod platform;
pub mod remover;
pub mod service;
pub mod storage;

pub use error::{ErrorKind, LibraryResult, PhotoLibraryError};
pub use format::{normalize_format, normalize_quality, DEFAULT_QUALITY};
pub use models::{
    ImageData, LibraryConfig, Locator, PhotoFormat, QualityPolicy, RemoveRequest, SaveRequest,
    SavedImage,
};
pub use permission::{GateState, GrantResult, PermissionGate};
pub use platform::{ContentEntry, ContentOutput, Platform, PlatformCapabilities};
pub use service::{PhotoSaver, SaveDisposition, SaveResponder};
pub use storage::StorageStrategy;
