//! Field presence and format checks for registration and login input.

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field")]
    MissingField,
    #[error("phone number must be in format 254xxxxxxxxx")]
    InvalidPhoneFormat,
    #[error("ID number must be 8 digits")]
    InvalidIdFormat,
}

/// `254` followed by nine ASCII digits.
#[must_use]
pub fn valid_phone_number(phone_number: &str) -> bool {
    Regex::new(r"^254[0-9]{9}$").is_ok_and(|re| re.is_match(phone_number))
}

/// Exactly eight ASCII digits.
#[must_use]
pub fn valid_id_number(id_number: &str) -> bool {
    Regex::new(r"^[0-9]{8}$").is_ok_and(|re| re.is_match(id_number))
}

/// Check registration input in order: presence, phone format, ID format.
///
/// # Errors
/// Returns the first failing check.
pub fn validate_registration(
    full_name: Option<&str>,
    phone_number: Option<&str>,
    id_number: Option<&str>,
) -> Result<(), ValidationError> {
    let (Some(full_name), Some(phone_number), Some(id_number)) =
        (full_name, phone_number, id_number)
    else {
        return Err(ValidationError::MissingField);
    };

    if full_name.is_empty() || phone_number.is_empty() || id_number.is_empty() {
        return Err(ValidationError::MissingField);
    }

    if !valid_phone_number(phone_number) {
        return Err(ValidationError::InvalidPhoneFormat);
    }

    if !valid_id_number(id_number) {
        return Err(ValidationError::InvalidIdFormat);
    }

    Ok(())
}

/// Login only requires both fields to be present.
///
/// # Errors
/// Returns [`ValidationError::MissingField`] if either is absent or empty.
pub fn validate_login(
    phone_number: Option<&str>,
    id_number: Option<&str>,
) -> Result<(), ValidationError> {
    match (phone_number, id_number) {
        (Some(phone), Some(id)) if !phone.is_empty() && !id.is_empty() => Ok(()),
        _ => Err(ValidationError::MissingField),
    }
}
