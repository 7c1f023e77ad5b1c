//! Common validation utilities.
//!
//! Every function follows the `validator` custom-function shape so it can be
//! referenced from `#[validate(custom(function = ...))]` attributes.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref CONTACT_PHONE_REGEX: Regex = Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap();
    static ref LOOSE_EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();
    static ref POSITIVE_INTEGER_REGEX: Regex = Regex::new(r"^[1-9]\d*$").unwrap();
}

/// Minimum number of characters for an account or supervisor phone number.
pub const MIN_PHONE_LENGTH: usize = 10;

/// Width of every stored phone number column.
pub const MAX_PHONE_LENGTH: usize = 20;

/// Width of every stored email column.
pub const MAX_EMAIL_LENGTH: usize = 255;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Guest phone: optional leading `+`, no leading zero, at most 16 digits.
pub fn validate_contact_phone(phone: &str) -> Result<(), ValidationError> {
    if CONTACT_PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        Err(error("phone_format", "Please provide a valid phone number"))
    }
}

/// Permissive `local@domain.tld` check used for guest emails.
pub fn validate_contact_email(email: &str) -> Result<(), ValidationError> {
    if !LOOSE_EMAIL_REGEX.is_match(email) {
        return Err(error("email_format", "Please provide a valid email address"));
    }
    validate_email_length(email)
}

/// Emails must fit the stored column once trimmed.
pub fn validate_email_length(email: &str) -> Result<(), ValidationError> {
    if email.trim().chars().count() <= MAX_EMAIL_LENGTH {
        Ok(())
    } else {
        Err(error(
            "email_length",
            "Email address cannot exceed 255 characters",
        ))
    }
}

/// Account, OTP and supervisor phone numbers hold between ten and twenty
/// characters.
pub fn validate_phone_length(phone: &str) -> Result<(), ValidationError> {
    let length = phone.trim().chars().count();
    if length < MIN_PHONE_LENGTH {
        Err(error(
            "phone_length",
            "Phone number must be at least 10 digits",
        ))
    } else if length > MAX_PHONE_LENGTH {
        Err(error(
            "phone_length",
            "Phone number cannot exceed 20 characters",
        ))
    } else {
        Ok(())
    }
}

/// `#RRGGBB`, case-insensitive.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        Err(error(
            "hex_color",
            "Color must be a valid hex code (e.g. #1A2B3C)",
        ))
    }
}

/// A positive whole number written as a string (partners submit counts as text).
pub fn validate_positive_integer(value: &str) -> Result<(), ValidationError> {
    if POSITIVE_INTEGER_REGEX.is_match(value.trim()) {
        Ok(())
    } else {
        Err(error("positive_integer", "Must be a positive number"))
    }
}

/// Rejects strings that are empty after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "Value must not be blank"))
    } else {
        Ok(())
    }
}

/// Rejects a list with no non-blank entries.
pub fn validate_non_empty_list(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| !v.trim().is_empty()) {
        Ok(())
    } else {
        Err(error("empty_list", "At least one value is required"))
    }
}
