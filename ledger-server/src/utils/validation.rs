//! Input validation helpers
//!
//! Centralized length limits and range checks shared by catalog and ledger
//! inputs. All failures are `validation_error`.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: category, product, unit, area, table, user
pub const MAX_NAME_LEN: usize = 120;

/// IANA timezone names
pub const MAX_TIMEZONE_LEN: usize = 80;

/// Email addresses
pub const MIN_EMAIL_LEN: usize = 3;
pub const MAX_EMAIL_LEN: usize = 240;

/// Comma separated role list
pub const MAX_ROLES_LEN: usize = 240;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    validate_text_len(value, field, 1, max_len)
}

/// Validate a string length in characters.
pub fn validate_text_len(
    value: &str,
    field: &str,
    min_len: usize,
    max_len: usize,
) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min_len {
        return Err(AppError::validation(format!(
            "{field} is too short ({len} chars, min {min_len})"
        )));
    }
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
pub fn require_finite(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate a finite f64 inside `min..=max`.
pub fn validate_f64_range(value: f64, field: &str, min: f64, max: f64) -> Result<(), AppError> {
    require_finite(value, field)?;
    if value < min || value > max {
        return Err(AppError::validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

/// Validate an integer inside `min..=max`.
pub fn validate_i64_range(value: i64, field: &str, min: i64, max: i64) -> Result<(), AppError> {
    if value < min || value > max {
        return Err(AppError::validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}
