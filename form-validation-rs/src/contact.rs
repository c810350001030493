//! Contact form rules
//!
//! Rules run in a fixed order and stop at the first failure. Each rule
//! carries the message shown to the visitor.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::errors::ValidationError;
use crate::validators::{chars_between, is_email, max_chars, no_spam, not_empty};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const EMAIL_MAX_CHARS: usize = 100;
pub const COMPANY_MAX_CHARS: usize = 100;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// Shown after the form has been handed to the endpoint
pub const SUBMIT_SUCCESS_MESSAGE: &str = "送信完了しました！";

/// One step of the contact form validation, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRule {
    Required,
    NameLength,
    EmailFormat,
    EmailLength,
    CompanyLength,
    MessageLength,
    Spam,
}

impl ContactRule {
    /// Message presented to the visitor when this rule fails
    pub fn user_message(&self) -> &'static str {
        match self {
            ContactRule::Required => "必須項目を入力してください。",
            ContactRule::NameLength => "お名前は2文字以上50文字以下で入力してください。",
            ContactRule::EmailFormat => "正しいメールアドレスを入力してください。",
            ContactRule::EmailLength => "メールアドレスは100文字以下で入力してください。",
            ContactRule::CompanyLength => "会社名は100文字以下で入力してください。",
            ContactRule::MessageLength => {
                "お問い合わせ内容は10文字以上1000文字以下で入力してください。"
            }
            ContactRule::Spam => "不適切な内容が含まれています。",
        }
    }
}

/// A failed contact form check
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} ({cause})", .rule.user_message())]
pub struct ContactFormError {
    pub rule: ContactRule,
    pub cause: ValidationError,
}

impl ContactFormError {
    fn new(rule: ContactRule, cause: ValidationError) -> Self {
        Self { rule, cause }
    }

    pub fn user_message(&self) -> &'static str {
        self.rule.user_message()
    }
}

/// Fields submitted by the public contact form
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
}

impl ContactForm {
    /// Build a form from loosely-typed field pairs; absent fields are empty
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let get = |key: &str| fields.get(key).cloned().unwrap_or_default();
        Self {
            name: get("name"),
            email: get("email"),
            company: get("company"),
            message: get("message"),
        }
    }

    /// Run every rule in order, returning the first failure
    pub fn validate(&self) -> Result<(), ContactFormError> {
        let required = [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("message", self.message.as_str()),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(field, value)| not_empty(field, value).is_err())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(ContactFormError::new(
                ContactRule::Required,
                ValidationError::MissingFields(missing.join(", ")),
            ));
        }

        chars_between("name", &self.name, NAME_MIN_CHARS, NAME_MAX_CHARS)
            .map_err(|e| ContactFormError::new(ContactRule::NameLength, e))?;

        is_email(&self.email).map_err(|e| ContactFormError::new(ContactRule::EmailFormat, e))?;

        max_chars("email", &self.email, EMAIL_MAX_CHARS)
            .map_err(|e| ContactFormError::new(ContactRule::EmailLength, e))?;

        if !self.company.is_empty() {
            max_chars("company", &self.company, COMPANY_MAX_CHARS)
                .map_err(|e| ContactFormError::new(ContactRule::CompanyLength, e))?;
        }

        chars_between("message", &self.message, MESSAGE_MIN_CHARS, MESSAGE_MAX_CHARS)
            .map_err(|e| ContactFormError::new(ContactRule::MessageLength, e))?;

        no_spam(&self.message).map_err(|e| ContactFormError::new(ContactRule::Spam, e))?;

        Ok(())
    }
}
