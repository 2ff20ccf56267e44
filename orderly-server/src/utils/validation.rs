//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Validation
//! runs before any storage access; limits are UX bounds, the stores do not
//! enforce lengths themselves.

use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Location and visitor display names
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, email, contact fields
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Attachment references (storage keys / paths)
pub const MAX_REF_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that a string (empty allowed) is within the length limit.
pub fn validate_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate an optional opaque reference (attachment keys etc.).
pub fn validate_optional_ref(value: &Option<String>, field: &str) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > MAX_REF_LEN
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {MAX_REF_LEN})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Alice", "display_name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "display_name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "display_name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "display_name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_text("", "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_text("short note", "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_text(&"x".repeat(501), "notes", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_optional_ref() {
        assert!(validate_optional_ref(&None, "attachment").is_ok());
        assert!(validate_optional_ref(&Some("receipts/abc.png".into()), "attachment").is_ok());
        assert!(validate_optional_ref(&Some("x".repeat(3000)), "attachment").is_err());
    }
}
