//! CLI argument validation functions
//!
//! Custom value parsers for arguments clap cannot validate on its own.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::services::notifications::ScalarValue;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Parse `KEY=VALUE` into an extra payload field
///
/// The value keeps its JSON scalar type when it parses as one (`3`, `true`).
pub fn parse_field(raw: &str) -> Result<(String, ScalarValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Field must be in KEY=VALUE form, got: '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Field key cannot be empty: '{}'", raw));
    }

    Ok((key.to_string(), ScalarValue::parse_lenient(value)))
}

/// Parse `--data` as a JSON object
///
/// Conversion to notification data happens later, once logging is set up.
pub fn parse_data_json(raw: &str) -> Result<Value, String> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| format!("Invalid --data JSON: {}", e))?;
    if !value.is_object() {
        return Err(format!("--data must be a JSON object, got: '{}'", raw));
    }
    Ok(value)
}

/// Validate HTTP method token used by `sign`
pub fn validate_method(raw: &str) -> Result<String, String> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("HTTP method must be alphabetic, got: '{}'", raw));
    }
    Ok(raw.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_field_typed_values() {
        assert_eq!(
            parse_field("room=lobby").unwrap(),
            ("room".to_string(), ScalarValue::from("lobby"))
        );
        assert_eq!(
            parse_field("count=3").unwrap(),
            ("count".to_string(), ScalarValue::from(3))
        );
    }

    #[test]
    fn test_parse_field_keeps_equals_in_value() {
        let (key, value) = parse_field("url=https://x.io/?a=b").unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, ScalarValue::from("https://x.io/?a=b"));
    }

    #[test]
    fn test_parse_field_rejects_missing_separator() {
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_parse_data_json() {
        let data = parse_data_json(r#"{"alert":"hi","tags":["a"]}"#).unwrap();
        assert_eq!(data["alert"], "hi");
        assert_eq!(data["tags"], serde_json::json!(["a"]));
        assert!(parse_data_json("[1]").is_err());
        assert!(parse_data_json("{not json").is_err());
    }

    #[test]
    fn test_validate_method() {
        assert_eq!(validate_method("post").unwrap(), "POST");
        assert!(validate_method("PO ST").is_err());
        assert!(validate_method("").is_err());
    }

    #[test]
    fn test_validate_config_file_path() {
        let file = NamedTempFile::new().unwrap();
        assert!(validate_config_file_path(file.path().to_str().unwrap()).is_ok());
        assert!(validate_config_file_path("/nonexistent/boxcar.toml").is_err());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
    }
}
