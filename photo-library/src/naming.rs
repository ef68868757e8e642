use crate::models::PhotoFormat;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Builds the file name for a saved image.
///
/// The timestamp fields are concatenated without separators or zero padding,
/// so two saves with the same prefix inside the same second produce the same
/// name.
pub fn file_name(prefix: &str, at: &NaiveDateTime, format: PhotoFormat) -> String {
    format!(
        "{}{}{}{}{}{}{}.{}",
        prefix,
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute(),
        at.second(),
        format.extension()
    )
}

/// File name stamped with the local wall-clock time
pub fn file_name_now(prefix: &str, format: PhotoFormat) -> String {
    file_name(prefix, &chrono::Local::now().naive_local(), format)
}
