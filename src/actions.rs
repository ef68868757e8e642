//! Action names and lenient argument access for the host bridge.

use crate::error::PluginError;
use photo_library::{ImageData, QualityPolicy, RemoveRequest, SaveRequest};
use serde_json::Value;

pub const SAVE_BASE64_ACTION: &str = "saveImageDataToLibrary";
pub const REMOVE_IMAGE_ACTION: &str = "removeImageFromLibrary";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SaveImage,
    RemoveImage,
}

impl Action {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            SAVE_BASE64_ACTION => Some(Action::SaveImage),
            REMOVE_IMAGE_ACTION => Some(Action::RemoveImage),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::SaveImage => SAVE_BASE64_ACTION,
            Action::RemoveImage => REMOVE_IMAGE_ACTION,
        }
    }
}

/// Positional action arguments with JavaScript-friendly coercions.
///
/// Missing or mistyped entries never fail: strings default to `""`, booleans
/// to `false` and integers to `0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionArgs(Vec<Value>);

impl ActionArgs {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn from_value(value: Value) -> Result<Self, PluginError> {
        match value {
            Value::Array(values) => Ok(Self(values)),
            Value::Null => Ok(Self::default()),
            other => Err(PluginError::Arguments(format!(
                "expected an argument array, got {}",
                other
            ))),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, PluginError> {
        let value = serde_json::from_str(raw)
            .map_err(|e| PluginError::Arguments(format!("malformed JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn opt_string(&self, index: usize) -> String {
        match self.0.get(index) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn opt_bool(&self, index: usize) -> bool {
        match self.0.get(index) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn opt_int(&self, index: usize) -> i64 {
        match self.0.get(index) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(|f| f as i64)
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// `[base64, prefix, mediaScannerEnabled, format, quality]`
    pub fn save_request(&self, policy: QualityPolicy) -> SaveRequest {
        SaveRequest::from_raw(
            ImageData::Base64(self.opt_string(0)),
            self.opt_string(1),
            self.opt_bool(2),
            &self.opt_string(3),
            self.opt_int(4),
            policy,
        )
    }

    /// `[path]`
    pub fn remove_request(&self) -> RemoveRequest {
        RemoveRequest::new(self.opt_string(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photo_library::PhotoFormat;
    use serde_json::json;

    #[test]
    fn test_action_names() {
        assert_eq!(
            Action::from_name("saveImageDataToLibrary"),
            Some(Action::SaveImage)
        );
        assert_eq!(
            Action::from_name("removeImageFromLibrary"),
            Some(Action::RemoveImage)
        );
        assert_eq!(Action::from_name("share"), None);
    }

    #[test]
    fn test_lenient_coercions() {
        let args = ActionArgs::from_value(json!(["abc", null, "TRUE", 3.9, "42"])).unwrap();
        assert_eq!(args.opt_string(0), "abc");
        assert_eq!(args.opt_string(1), "");
        assert_eq!(args.opt_string(9), "");
        assert!(args.opt_bool(2));
        assert!(!args.opt_bool(0));
        assert_eq!(args.opt_int(3), 3);
        assert_eq!(args.opt_int(4), 42);
        assert_eq!(args.opt_int(0), 0);
    }

    #[test]
    fn test_save_request_from_args() {
        let args = ActionArgs::from_json(r#"["aGVsbG8=", "img_", true, "png", 0]"#).unwrap();
        let req = args.save_request(QualityPolicy::Clamp);
        assert_eq!(req.image_data, ImageData::Base64("aGVsbG8=".into()));
        assert_eq!(req.name_prefix, "img_");
        assert!(req.notify_indexer);
        assert_eq!(req.format, PhotoFormat::Png);
        assert_eq!(req.quality, 100);
    }

    #[test]
    fn test_missing_save_args_default() {
        let args = ActionArgs::from_json(r#"["aGVsbG8="]"#).unwrap();
        let req = args.save_request(QualityPolicy::Clamp);
        assert_eq!(req.name_prefix, "");
        assert!(!req.notify_indexer);
        assert_eq!(req.format, PhotoFormat::Jpeg);
        assert_eq!(req.quality, 100);
    }

    #[test]
    fn test_non_array_is_rejected() {
        assert!(ActionArgs::from_json(r#"{"path": "/x"}"#).is_err());
        assert!(ActionArgs::from_json("not json").is_err());
        assert_eq!(ActionArgs::from_json("null").unwrap(), ActionArgs::default());
    }
}
