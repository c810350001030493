//! # Form Validation Library
//!
//! Validation rules for the public contact form. The same rules run in the
//! browser before submission and in the gateway when the form reaches the
//! server, so a visitor sees the same message either way.
//!
//! ## Rules (evaluated in order, first failure wins)
//!
//! 1. name, email and message are required
//! 2. name is 2 to 50 characters
//! 3. email is `local@domain.tld` shaped
//! 4. email is at most 100 characters
//! 5. company, when given, is at most 100 characters
//! 6. message is 10 to 1000 characters
//! 7. message carries no spam pattern

mod contact;
mod errors;
pub mod validators;

pub use contact::{
    ContactForm, ContactFormError, ContactRule, COMPANY_MAX_CHARS, EMAIL_MAX_CHARS,
    MESSAGE_MAX_CHARS, MESSAGE_MIN_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS,
    SUBMIT_SUCCESS_MESSAGE,
};
pub use errors::{ValidationError, ValidationResult};
pub use validators::SpamKind;

/// Re-export commonly used items for convenience
pub mod prelude {
    pub use crate::contact::{ContactForm, ContactFormError, ContactRule};
    pub use crate::errors::{ValidationError, ValidationResult};
    pub use crate::validators;
}

/// Version of the validation library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
