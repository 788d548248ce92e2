//! Contact form model and validation

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // local@domain.tld shape; anything stricter belongs to the mail
    // collaborator
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

const NAME_MIN_LEN: usize = 2;
const MESSAGE_MIN_LEN: usize = 10;

/// A contact form submission. Transient; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

/// A field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl ContactForm {
    /// Validate the submission. Returns every field error at once so
    /// the form can surface all of them. Phone is optional and
    /// unchecked.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        } else if name.chars().count() < NAME_MIN_LEN {
            errors.push(FieldError::new(
                "name",
                "Name must be at least 2 characters",
            ));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !EMAIL_RE.is_match(email) {
            errors.push(FieldError::new(
                "email",
                "Please enter a valid email address",
            ));
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.push(FieldError::new("message", "Message is required"));
        } else if message.chars().count() < MESSAGE_MIN_LEN {
            errors.push(FieldError::new(
                "message",
                "Message must be at least 10 characters",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
