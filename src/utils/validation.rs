use crate::utils::error::{ConvertError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn source_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^.+\.(plist|xml)$").expect("source name pattern is valid")
    })
}

/// Suffix check done before reading a source file. The parser stays the
/// authority on whether the content is actually usable.
pub fn validate_source_file_name(name: &str) -> Result<()> {
    let file_name = std::path::Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);

    if source_name_pattern().is_match(file_name) {
        Ok(())
    } else {
        Err(ConvertError::UnsupportedSourceError {
            name: name.to_string(),
        })
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConvertError::config(format!("{}: path cannot be empty", field_name)));
    }

    if path.contains('\0') {
        return Err(ConvertError::config(format!(
            "{}: path contains null bytes",
            field_name
        )));
    }

    Ok(())
}

/// Worksheet names are limited to 31 characters and may not contain `[]:*?/\`.
pub fn validate_sheet_name(field_name: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ConvertError::config(format!(
            "{}: sheet name cannot be empty or whitespace-only",
            field_name
        )));
    }

    if name.chars().count() > 31 {
        return Err(ConvertError::config(format!(
            "{}: sheet name '{}' is longer than 31 characters",
            field_name, name
        )));
    }

    if let Some(c) = name.chars().find(|c| "[]:*?/\\".contains(*c)) {
        return Err(ConvertError::config(format!(
            "{}: sheet name '{}' contains forbidden character '{}'",
            field_name, name, c
        )));
    }

    Ok(())
}
