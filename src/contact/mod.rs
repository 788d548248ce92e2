//! Contact form validation and delivery

pub mod form;
pub mod mailer;

pub use form::{ContactForm, FieldError};
pub use mailer::{MailConfig, MailError, Mailer};
