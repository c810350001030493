//! Validator functions
//!
//! Field-level checks used by the contact form rules. They can also be
//! used directly by other services.

pub mod spam;
pub mod string;

pub use spam::*;
pub use string::*;
