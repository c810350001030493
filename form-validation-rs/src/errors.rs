//! Error handling for the validation library

use thiserror::Error;

use crate::validators::SpamKind;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Enum representing different validation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Input is missing required fields
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    /// Input is too short
    #[error("Input is shorter than minimum length: {0}")]
    TooShort(String),

    /// Input is too long
    #[error("Input exceeds maximum length: {0}")]
    TooLong(String),

    /// Input validation failed for regex pattern
    #[error("Pattern match failed: {0}")]
    PatternMismatch(String),

    /// Input looks like unsolicited content
    #[error("Spam pattern detected: {0}")]
    Spam(SpamKind),
}

impl ValidationError {
    /// Returns true if the input was rejected by the spam heuristics
    pub fn is_spam(&self) -> bool {
        matches!(self, ValidationError::Spam(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::TooShort("name has 1 characters, minimum is 2".to_string());
        assert_eq!(
            err.to_string(),
            "Input is shorter than minimum length: name has 1 characters, minimum is 2"
        );

        let spam = ValidationError::Spam(SpamKind::Url);
        assert!(spam.is_spam());
        assert!(!err.is_spam());
    }
}
