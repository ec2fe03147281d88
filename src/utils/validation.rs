//! Validation Utilities
//!
//! Custom validators for user data and footprint payloads, usable both
//! directly and through the `validator` derive.

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

/// Validates email address format
pub fn validate_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    regex.is_match(email)
}

/// Normalizes email address to lowercase and removes whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates an ISO 3166 alpha-2 country code
pub fn validate_country_code(code: &str) -> bool {
    static COUNTRY_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COUNTRY_REGEX
        .get_or_init(|| Regex::new(r"^[A-Z]{2}$").expect("Failed to compile country regex"));

    regex.is_match(code)
}

/// Validates a Uniform Resource Name (RFC 8141 shape, loosely)
pub fn validate_urn(urn: &str) -> bool {
    static URN_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = URN_REGEX.get_or_init(|| {
        Regex::new(r"^urn:[a-zA-Z0-9][a-zA-Z0-9-]{0,31}:.+$")
            .expect("Failed to compile URN regex")
    });

    regex.is_match(urn)
}

/// Validates UUID format
pub fn validate_uuid(uuid_str: &str) -> bool {
    uuid::Uuid::parse_str(uuid_str).is_ok()
}

/// Custom validator for email fields using the validator crate
pub fn email_validator(email: &str) -> Result<(), ValidationError> {
    if validate_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email"))
    }
}

/// Custom validator for ISO country code fields using the validator crate
pub fn country_code_validator(code: &str) -> Result<(), ValidationError> {
    if validate_country_code(code) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_country_code"))
    }
}
