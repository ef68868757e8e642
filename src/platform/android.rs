// Android platform backed by JNI calls into the hosting activity.
//
// Content index: MediaStore through the activity's ContentResolver.
// Permission: WRITE_EXTERNAL_STORAGE via checkSelfPermission/requestPermissions.
// The host forwards onRequestPermissionsResult to
// `SaveImageGallery::on_request_permission_result`.

use crate::config::PluginConfig;
use crate::error::PluginError;
use crate::plugin::WRITE_PERM_REQUEST_CODE;
use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};
use ndk_context::android_context;
use photo_library::{ContentEntry, ContentOutput, Locator, Platform, PlatformCapabilities};
use std::io::{self, Write};
use std::path::PathBuf;

const WRITE_EXTERNAL_STORAGE: &str = "android.permission.WRITE_EXTERNAL_STORAGE";
const ACTION_MEDIA_SCANNER_SCAN_FILE: &str = "android.intent.action.MEDIA_SCANNER_SCAN_FILE";
/// First API level with runtime permissions
const RUNTIME_PERMISSIONS_MIN_SDK: i32 = 23;

pub struct AndroidPlatform {
    vm: JavaVM,
    activity: GlobalRef,
    api_level: i32,
    capabilities: PlatformCapabilities,
    pictures_dir: PathBuf,
}

fn jni_error(e: jni::errors::Error) -> PluginError {
    PluginError::Platform(format!("JNI call failed: {}", e))
}

fn jni_io(e: jni::errors::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("JNI call failed: {}", e))
}

/// Runs `f` inside a local reference frame and clears any pending Java exception.
fn in_frame<T>(
    vm: &JavaVM,
    f: impl FnOnce(&mut JNIEnv) -> jni::errors::Result<T>,
) -> jni::errors::Result<T> {
    let mut env = vm.attach_current_thread()?;
    let result = env.with_local_frame(16, |env| f(env));
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    result
}

fn jstring_to_string(env: &mut JNIEnv, obj: JObject) -> jni::errors::Result<String> {
    let s = JString::from(obj);
    Ok(env.get_string(&s)?.into())
}

fn parse_uri<'a>(env: &mut JNIEnv<'a>, uri: &str) -> jni::errors::Result<JObject<'a>> {
    let raw = env.new_string(uri)?;
    env.call_static_method(
        "android/net/Uri",
        "parse",
        "(Ljava/lang/String;)Landroid/net/Uri;",
        &[JValue::Object(&raw)],
    )?
    .l()
}

impl AndroidPlatform {
    /// Connects to the activity provided by `ndk-context`.
    pub fn new(config: &PluginConfig) -> Result<Self, PluginError> {
        let ctx = android_context();
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }.map_err(jni_error)?;

        let (activity, api_level, pictures_dir) = {
            let mut env = vm.attach_current_thread().map_err(jni_error)?;
            let activity = unsafe { JObject::from_raw(ctx.context().cast()) };
            let activity = env.new_global_ref(activity).map_err(jni_error)?;

            let api_level = env
                .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
                .and_then(|v| v.i())
                .map_err(jni_error)?;

            let pictures_dir = Self::public_pictures_dir(&mut env).map_err(jni_error)?;
            (activity, api_level, pictures_dir)
        };

        log::debug!(
            "Android API level {}, pictures dir {:?}",
            api_level,
            pictures_dir
        );

        Ok(Self {
            vm,
            activity,
            api_level,
            capabilities: config.capabilities_for(api_level.max(0) as u32),
            pictures_dir,
        })
    }

    pub fn api_level(&self) -> i32 {
        self.api_level
    }

    /// `Environment.getExternalStoragePublicDirectory(DIRECTORY_PICTURES)`
    pub fn pictures_dir(&self) -> PathBuf {
        self.pictures_dir.clone()
    }

    fn public_pictures_dir(env: &mut JNIEnv) -> jni::errors::Result<PathBuf> {
        let kind = env
            .get_static_field(
                "android/os/Environment",
                "DIRECTORY_PICTURES",
                "Ljava/lang/String;",
            )?
            .l()?;
        let dir = env
            .call_static_method(
                "android/os/Environment",
                "getExternalStoragePublicDirectory",
                "(Ljava/lang/String;)Ljava/io/File;",
                &[JValue::Object(&kind)],
            )?
            .l()?;
        let path = env
            .call_method(&dir, "getAbsolutePath", "()Ljava/lang/String;", &[])?
            .l()?;
        Ok(PathBuf::from(jstring_to_string(env, path)?))
    }

    fn content_resolver<'a>(&self, env: &mut JNIEnv<'a>) -> jni::errors::Result<JObject<'a>> {
        env.call_method(
            self.activity.as_obj(),
            "getContentResolver",
            "()Landroid/content/ContentResolver;",
            &[],
        )?
        .l()
    }
}

impl Platform for AndroidPlatform {
    fn capabilities(&self) -> PlatformCapabilities {
        self.capabilities
    }

    fn has_storage_permission(&self) -> bool {
        if self.api_level < RUNTIME_PERMISSIONS_MIN_SDK {
            return true;
        }
        let result = in_frame(&self.vm, |env| {
            let permission = env.new_string(WRITE_EXTERNAL_STORAGE)?;
            env.call_method(
                self.activity.as_obj(),
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&permission)],
            )?
            .i()
        });
        match result {
            Ok(code) => code == 0,
            Err(e) => {
                log::error!("checkSelfPermission failed: {}", e);
                false
            }
        }
    }

    fn request_storage_permission(&self) {
        let result = in_frame(&self.vm, |env| {
            let permission = env.new_string(WRITE_EXTERNAL_STORAGE)?;
            let permissions = env.new_object_array(1, "java/lang/String", &permission)?;
            env.call_method(
                self.activity.as_obj(),
                "requestPermissions",
                "([Ljava/lang/String;I)V",
                &[
                    JValue::Object(&permissions),
                    JValue::Int(WRITE_PERM_REQUEST_CODE),
                ],
            )?;
            Ok(())
        });
        if let Err(e) = result {
            log::error!("requestPermissions failed: {}", e);
        }
    }

    fn insert_content_entry(&self, entry: &ContentEntry) -> io::Result<Option<String>> {
        in_frame(&self.vm, |env| {
            let values = env.new_object("android/content/ContentValues", "()V", &[])?;
            for (key, value) in [
                ("_display_name", entry.display_name.as_str()),
                ("mime_type", entry.mime_type.as_str()),
                ("relative_path", entry.relative_path.as_str()),
            ] {
                let key = env.new_string(key)?;
                let value = env.new_string(value)?;
                env.call_method(
                    &values,
                    "put",
                    "(Ljava/lang/String;Ljava/lang/String;)V",
                    &[JValue::Object(&key), JValue::Object(&value)],
                )?;
            }

            let collection = env
                .get_static_field(
                    "android/provider/MediaStore$Images$Media",
                    "EXTERNAL_CONTENT_URI",
                    "Landroid/net/Uri;",
                )?
                .l()?;
            let resolver = self.content_resolver(env)?;
            let inserted = env
                .call_method(
                    &resolver,
                    "insert",
                    "(Landroid/net/Uri;Landroid/content/ContentValues;)Landroid/net/Uri;",
                    &[JValue::Object(&collection), JValue::Object(&values)],
                )?
                .l()?;
            if inserted.is_null() {
                return Ok(None);
            }

            let text = env
                .call_method(&inserted, "toString", "()Ljava/lang/String;", &[])?
                .l()?;
            Ok(Some(jstring_to_string(env, text)?))
        })
        .map_err(jni_io)
    }

    fn open_content_output(&self, uri: &str) -> io::Result<ContentOutput> {
        let stream = in_frame(&self.vm, |env| {
            let parsed = parse_uri(env, uri)?;
            let resolver = self.content_resolver(env)?;
            let stream = env
                .call_method(
                    &resolver,
                    "openOutputStream",
                    "(Landroid/net/Uri;)Ljava/io/OutputStream;",
                    &[JValue::Object(&parsed)],
                )?
                .l()?;
            if stream.is_null() {
                return Ok(None);
            }
            Ok(Some((env.new_global_ref(stream)?, env.get_java_vm()?)))
        })
        .map_err(jni_io)?;

        match stream {
            Some((stream, vm)) => Ok(Box::new(JavaOutputStream { vm, stream })),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no output stream for {}", uri),
            )),
        }
    }

    fn delete_content_entry(&self, uri: &str) -> io::Result<bool> {
        in_frame(&self.vm, |env| {
            let parsed = parse_uri(env, uri)?;
            let resolver = self.content_resolver(env)?;
            let null = JObject::null();
            let rows = env
                .call_method(
                    &resolver,
                    "delete",
                    "(Landroid/net/Uri;Ljava/lang/String;[Ljava/lang/String;)I",
                    &[
                        JValue::Object(&parsed),
                        JValue::Object(&null),
                        JValue::Object(&null),
                    ],
                )?
                .i()?;
            Ok(rows > 0)
        })
        .map_err(jni_io)
    }

    fn notify_new_media(&self, locator: &Locator) {
        let target = locator.to_string();
        let result = in_frame(&self.vm, |env| {
            let action = env.new_string(ACTION_MEDIA_SCANNER_SCAN_FILE)?;
            let intent = env.new_object(
                "android/content/Intent",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&action)],
            )?;
            let data = parse_uri(env, &target)?;
            env.call_method(
                &intent,
                "setData",
                "(Landroid/net/Uri;)Landroid/content/Intent;",
                &[JValue::Object(&data)],
            )?;
            env.call_method(
                self.activity.as_obj(),
                "sendBroadcast",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&intent)],
            )?;
            Ok(())
        });
        match result {
            Ok(()) => log::debug!("Media scanner notified for {}", target),
            Err(e) => log::warn!("Media scanner broadcast failed for {}: {}", target, e),
        }
    }
}

/// `java.io.OutputStream` exposed as `std::io::Write`; closed on drop
struct JavaOutputStream {
    vm: JavaVM,
    stream: GlobalRef,
}

impl Write for JavaOutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        in_frame(&self.vm, |env| {
            let bytes = env.byte_array_from_slice(buf)?;
            env.call_method(self.stream.as_obj(), "write", "([B)V", &[JValue::Object(&bytes)])?;
            Ok(buf.len())
        })
        .map_err(jni_io)
    }

    fn flush(&mut self) -> io::Result<()> {
        in_frame(&self.vm, |env| {
            env.call_method(self.stream.as_obj(), "flush", "()V", &[])?;
            Ok(())
        })
        .map_err(jni_io)
    }
}

impl Drop for JavaOutputStream {
    fn drop(&mut self) {
        let closed = in_frame(&self.vm, |env| {
            env.call_method(self.stream.as_obj(), "close", "()V", &[])?;
            Ok(())
        });
        if let Err(e) = closed {
            log::error!("Error closing OutputStream: {}", e);
        }
    }
}
