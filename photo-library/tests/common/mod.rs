#![allow(dead_code)]

use base64::Engine;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use photo_library::{ContentEntry, ContentOutput, Locator, Platform, PlatformCapabilities};
use std::collections::HashMap;
use std::io::{self, Cursor, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the host platform
#[derive(Default)]
pub struct MockPlatform {
    pub capabilities: PlatformCapabilities,
    pub permission_held: AtomicBool,
    pub refuse_insert: bool,
    pub fail_output: bool,
    pub permission_requests: AtomicUsize,
    pub notifications: Mutex<Vec<Locator>>,
    pub inserted: Mutex<Vec<ContentEntry>>,
    pub entries: Mutex<HashMap<String, Arc<Mutex<Vec<u8>>>>>,
}

impl MockPlatform {
    pub fn legacy() -> Self {
        Self::default()
    }

    pub fn legacy_enforced() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                managed_index_available: false,
                permission_enforced: true,
            },
            ..Self::default()
        }
    }

    pub fn managed() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                managed_index_available: true,
                permission_enforced: false,
            },
            ..Self::default()
        }
    }

    pub fn entry_bytes(&self, uri: &str) -> Option<Vec<u8>> {
        let entries = self.entries.lock().unwrap();
        entries.get(uri).map(|buf| buf.lock().unwrap().clone())
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct BrokenStream;

impl Write for BrokenStream {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "stream closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "stream closed"))
    }
}

impl Platform for MockPlatform {
    fn capabilities(&self) -> PlatformCapabilities {
        self.capabilities
    }

    fn has_storage_permission(&self) -> bool {
        self.permission_held.load(Ordering::SeqCst)
    }

    fn request_storage_permission(&self) {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
    }

    fn insert_content_entry(&self, entry: &ContentEntry) -> io::Result<Option<String>> {
        if self.refuse_insert {
            return Ok(None);
        }
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(entry.clone());
        let uri = format!("content://media/external/images/media/{}", inserted.len());
        self.entries
            .lock()
            .unwrap()
            .insert(uri.clone(), Arc::new(Mutex::new(Vec::new())));
        Ok(Some(uri))
    }

    fn open_content_output(&self, uri: &str) -> io::Result<ContentOutput> {
        if self.fail_output {
            return Ok(Box::new(BrokenStream));
        }
        let entries = self.entries.lock().unwrap();
        let buf = entries
            .get(uri)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, uri.to_string()))?;
        Ok(Box::new(SharedBuffer(buf)))
    }

    fn delete_content_entry(&self, uri: &str) -> io::Result<bool> {
        Ok(self.entries.lock().unwrap().remove(uri).is_some())
    }

    fn notify_new_media(&self, locator: &Locator) {
        self.notifications.lock().unwrap().push(locator.clone());
    }
}

pub fn png_base64(width: u32, height: u32) -> String {
    let img = RgbaImage::from_pixel(width, height, Rgba([12, 34, 56, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    base64::engine::general_purpose::STANDARD.encode(buf.into_inner())
}

pub fn jpeg_base64(width: u32, height: u32) -> String {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
    base64::engine::general_purpose::STANDARD.encode(buf.into_inner())
}
