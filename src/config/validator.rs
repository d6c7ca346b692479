//! Validation and type conversion for raw configuration strings.
//!
//! Every function is pure apart from `validate_directory_path` with
//! `create_if_missing`, which creates the directory on disk. The `field`
//! argument is only used to label errors.

use super::types::{LogLevel, ThemeMode};
use crate::error::{ValidationError, ValidationResult};
use crate::paths::{absolutize, current_dir};
use std::path::PathBuf;

const TRUTHY: [&str; 4] = ["true", "yes", "1", "on"];
const FALSY: [&str; 4] = ["false", "no", "0", "off"];

/// Parse a boolean token, case-insensitively.
pub fn parse_boolean(field: &str, raw: &str) -> ValidationResult<bool> {
    let lower = raw.to_lowercase();
    if TRUTHY.contains(&lower.as_str()) {
        Ok(true)
    } else if FALSY.contains(&lower.as_str()) {
        Ok(false)
    } else {
        Err(ValidationError::new(field, raw, "not a boolean"))
    }
}

/// Parse a base-10 integer strictly greater than zero.
pub fn parse_positive_integer(field: &str, raw: &str) -> ValidationResult<u64> {
    let digits = raw.trim();
    let not_positive = || ValidationError::new(field, raw, format!("{} must be positive", field));
    if digits.starts_with('-') && digits[1..].parse::<u64>().is_ok() {
        return Err(not_positive());
    }
    match digits.parse::<u64>() {
        Ok(0) => Err(not_positive()),
        Ok(value) => Ok(value),
        Err(e) => Err(ValidationError::new(field, raw, format!("{}", e))),
    }
}

/// Pass a string through, substituting `default` when absent.
pub fn parse_string(raw: Option<&str>, default: &str) -> String {
    raw.unwrap_or(default).to_string()
}

pub fn parse_log_level(field: &str, raw: &str) -> ValidationResult<LogLevel> {
    raw.parse()
        .map_err(|_| ValidationError::new(field, raw, "not a log level"))
}

pub fn parse_theme_mode(field: &str, raw: &str) -> ValidationResult<ThemeMode> {
    raw.parse()
        .map_err(|_| ValidationError::new(field, raw, "not a theme mode"))
}

/// Normalize a file path to absolute form.
///
/// With `must_exist`, the path must name an existing regular file.
pub fn validate_file_path(field: &str, raw: &str, must_exist: bool) -> ValidationResult<PathBuf> {
    let path = absolutize(&PathBuf::from(raw), &current_dir());
    if must_exist && !path.is_file() {
        return Err(ValidationError::new(field, raw, "file not found"));
    }
    Ok(path)
}

/// Normalize a directory path to absolute form, creating it if asked.
pub fn validate_directory_path(
    field: &str,
    raw: &str,
    create_if_missing: bool,
) -> ValidationResult<PathBuf> {
    let path = absolutize(&PathBuf::from(raw), &current_dir());
    if create_if_missing && !path.exists() {
        std::fs::create_dir_all(&path)
            .map_err(|e| ValidationError::new(field, raw, format!("cannot create: {}", e)))?;
    }
    Ok(path)
}
