//! Credential policy for registration

use crate::error::AppError;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;
const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 30;

/// Validate password strength
///
/// Requires 8 to 128 characters with at least one uppercase letter,
/// one lowercase letter and one digit.
///
/// # Errors
/// Returns a validation error naming the first rule that failed
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if len > MAX_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Password must be at most 128 characters long".to_string(),
        ));
    }

    if !password.chars().any(char::is_uppercase) {
        return Err(AppError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !password.chars().any(char::is_lowercase) {
        return Err(AppError::Validation(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Password must contain at least one digit".to_string(),
        ));
    }

    Ok(())
}

/// Usernames are 3-30 ASCII letters, digits or underscores
///
/// # Errors
/// Returns a validation error describing the format
pub fn validate_username(username: &str) -> Result<(), AppError> {
    let valid_len = (MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username.len());
    let valid_chars = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_len && valid_chars {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Username must be 3-30 characters of letters, digits or underscores".to_string(),
        ))
    }
}
