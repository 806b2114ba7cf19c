//! Credential format rules for registration and sign-in.

use docvault_core::error::AppError;

/// Shortest accepted login.
pub const LOGIN_MIN_LEN: usize = 8;
/// Longest accepted login.
pub const LOGIN_MAX_LEN: usize = 32;
/// Passwords must be strictly longer than this.
pub const PASSWORD_MIN_EXCLUSIVE: usize = 8;

/// Checks login and password shape before anything touches a store.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialValidator;

impl CredentialValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate both parts, login first.
    pub fn validate(&self, login: &str, password: &str) -> Result<(), AppError> {
        self.validate_login(login)?;
        self.validate_password(password)
    }

    /// 8 to 32 ASCII letters or digits.
    pub fn validate_login(&self, login: &str) -> Result<(), AppError> {
        let len_ok = (LOGIN_MIN_LEN..=LOGIN_MAX_LEN).contains(&login.len());
        if len_ok && login.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(())
        } else {
            Err(AppError::invalid_login())
        }
    }

    /// More than 8 characters with at least one uppercase letter, one
    /// lowercase letter, one digit and one symbol.
    pub fn validate_password(&self, password: &str) -> Result<(), AppError> {
        let long_enough = password.chars().count() > PASSWORD_MIN_EXCLUSIVE;
        let has_upper = password.chars().any(char::is_uppercase);
        let has_lower = password.chars().any(char::is_lowercase);
        let has_digit = password.chars().any(|c| c.is_numeric());
        let has_symbol = password.chars().any(|c| !c.is_alphanumeric());

        if long_enough && has_upper && has_lower && has_digit && has_symbol {
            Ok(())
        } else {
            Err(AppError::invalid_password())
        }
    }
}
