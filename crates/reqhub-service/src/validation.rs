//! Input rules shared by the services.
//!
//! Limits match the column widths of the schema, so every backend rejects
//! the same input before it reaches storage.

use reqhub_core::error::AppError;
use reqhub_core::result::AppResult;

/// Trims `name` and rejects it when blank.
pub fn required_name(label: &str, name: &str, max_chars: usize) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!("{label} name cannot be empty")));
    }
    bounded(label, "name", name, max_chars)?;
    Ok(name.to_string())
}

/// Trims `name`, falling back to `default` when it is blank or absent.
pub fn name_or_default(
    label: &str,
    name: Option<&str>,
    default: &str,
    max_chars: usize,
) -> AppResult<String> {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => {
            bounded(label, "name", name, max_chars)?;
            Ok(name.to_string())
        }
        _ => Ok(default.to_string()),
    }
}

/// Rejects `value` when it is longer than `max_chars` characters.
pub fn bounded(label: &str, field: &str, value: &str, max_chars: usize) -> AppResult<()> {
    if value.chars().count() > max_chars {
        return Err(AppError::validation(format!(
            "{label} {field} exceeds {max_chars} characters"
        )));
    }
    Ok(())
}
