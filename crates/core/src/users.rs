//! Account field rules shared by registration, login and bootstrap.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Minimum password length enforced on registration and admin bootstrap.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Canonical form used for storage and lookup. Emails compare
/// case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize `email` and reject it if it is not a syntactically valid address.
pub fn parse_email(email: &str) -> Result<String, CoreError> {
    let normalized = normalize_email(email);
    if !normalized.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{}' is not a valid email address",
            email.trim()
        )));
    }
    Ok(normalized)
}
