//! crates/meditrack_core/src/validation.rs
//!
//! Pure predicate functions backing the registration and login forms, plus
//! the whole-candidate registration check. Nothing in here touches storage.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::NewUser;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@([A-Za-z0-9-]+\.)+[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Rejection reasons for a registration candidate. The messages are the
/// patient-facing field messages, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least 8 characters with at least one uppercase letter, one lowercase letter, and one number")]
    WeakPassword,
    #[error("Please enter a valid age")]
    InvalidAge,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
}

/// Checks a registration candidate field by field, in the order the
/// registration form presents them. The first failing field wins.
pub fn validate_registration(candidate: &NewUser) -> Result<(), ValidationError> {
    if is_empty(&candidate.name) {
        return Err(ValidationError::EmptyName);
    }
    if !is_valid_email(&candidate.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_strong_password(&candidate.password) {
        return Err(ValidationError::WeakPassword);
    }
    if candidate.age == 0 {
        return Err(ValidationError::InvalidAge);
    }
    if !is_valid_phone(&candidate.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whitespace-only input counts as empty.
pub fn is_empty(value: &str) -> bool {
    value.trim().is_empty()
}

/// At least 8 characters with at least one number, one uppercase, and one
/// lowercase letter. Scanned by character class; the `regex` crate has no
/// lookahead.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn do_values_match(value1: &str, value2: &str) -> bool {
    value1 == value2
}

/// Exactly 10 digits once everything that is not a digit is stripped.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() == 10
}

/// The registration form's strength meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Scores a password the way the strength meter does: one point each for
/// length >= 8, an uppercase letter, a digit, and a symbol.
pub fn password_strength(password: &str) -> PasswordStrength {
    let mut score = 0;
    if password.chars().count() >= 8 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 1;
    }
    match score {
        0 | 1 => PasswordStrength::Weak,
        2 | 3 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}
