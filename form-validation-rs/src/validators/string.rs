//! String validators
//!
//! Lengths are counted in characters, not bytes, so that Japanese input is
//! measured the way a visitor perceives it.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{ValidationError, ValidationResult};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern");
}

/// Number of characters in a string
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validate that a string is not empty
pub fn not_empty(field: &str, s: &str) -> ValidationResult<()> {
    if s.is_empty() {
        Err(ValidationError::MissingFields(field.to_string()))
    } else {
        Ok(())
    }
}

/// Validate that a string meets a minimum length requirement
pub fn min_chars(field: &str, s: &str, min: usize) -> ValidationResult<()> {
    let len = char_len(s);
    if len < min {
        Err(ValidationError::TooShort(format!(
            "{} has {} characters, minimum is {}",
            field, len, min
        )))
    } else {
        Ok(())
    }
}

/// Validate that a string does not exceed a maximum length
pub fn max_chars(field: &str, s: &str, max: usize) -> ValidationResult<()> {
    let len = char_len(s);
    if len > max {
        Err(ValidationError::TooLong(format!(
            "{} has {} characters, maximum is {}",
            field, len, max
        )))
    } else {
        Ok(())
    }
}

/// Validate an inclusive character-length range
pub fn chars_between(field: &str, s: &str, min: usize, max: usize) -> ValidationResult<()> {
    min_chars(field, s, min)?;
    max_chars(field, s, max)
}

/// Validate `local@domain.tld` shaped addresses
///
/// Deliberately loose: no whitespace, exactly one `@` and a dot somewhere in
/// the domain part.
pub fn is_email(s: &str) -> ValidationResult<()> {
    if EMAIL_RE.is_match(s) {
        Ok(())
    } else {
        Err(ValidationError::PatternMismatch(format!(
            "'{}' is not a valid email address",
            s
        )))
    }
}
