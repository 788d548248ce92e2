//! SMTP mailer for contact form submissions
//!
//! Transport credentials come from the environment only; they are never
//! read from site.yml and never rendered into any page or payload.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use super::form::ContactForm;

/// Errors from mail configuration or delivery
#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTP is partially configured: missing {0}")]
    MissingVar(&'static str),

    #[error("SMTP_PORT is not a valid port: {0}")]
    InvalidPort(String),

    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp transport: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// SMTP settings read from the environment
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Where submissions are delivered
    pub recipient: String,
}

impl MailConfig {
    /// Read settings from the environment. Returns `Ok(None)` when
    /// `SMTP_HOST` is unset (mail disabled); a half-configured
    /// environment is an error rather than a silent no-op.
    pub fn from_env() -> Result<Option<Self>, MailError> {
        let Ok(host) = std::env::var("SMTP_HOST") else {
            return Ok(None);
        };

        let require = |var: &'static str| {
            std::env::var(var).map_err(|_| MailError::MissingVar(var))
        };

        let username = require("SMTP_USERNAME")?;
        let password = require("SMTP_PASSWORD")?;
        let recipient = require("CONTACT_RECIPIENT")?;

        let port = match std::env::var("SMTP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| MailError::InvalidPort(value))?,
            Err(_) => 587,
        };

        Ok(Some(Self {
            host,
            port,
            username,
            password,
            recipient,
        }))
    }
}

/// Sends contact submissions over SMTP (STARTTLS)
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipient: Mailbox,
}

impl Mailer {
    /// Build a mailer from config. `sender_name` becomes the display
    /// name on the From header.
    pub fn new(config: &MailConfig, sender_name: &str) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let from = Mailbox::new(Some(sender_name.to_string()), config.username.parse()?);
        let recipient = config.recipient.parse::<Mailbox>()?;

        Ok(Self {
            transport,
            from,
            recipient,
        })
    }

    /// Send one submission. A single request/response round trip: no
    /// retry, no queue; a failed submission is simply lost.
    pub async fn send_contact(&self, form: &ContactForm) -> Result<(), MailError> {
        let (text, html) = render_bodies(form);

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.recipient.clone())
            .subject(format!("New Contact Form Submission from {}", form.name));

        // Replying should go to the visitor, not the SMTP account
        if let Ok(reply_to) = form.email.parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }

        let email = builder.multipart(MultiPart::alternative_plain_html(text, html))?;

        self.transport.send(email).await?;
        tracing::info!(recipient = %self.recipient, "contact submission delivered");
        Ok(())
    }
}

/// Render the plain-text and HTML bodies for a submission
fn render_bodies(form: &ContactForm) -> (String, String) {
    let phone_text = form
        .phone
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("Phone: {}\n", p))
        .unwrap_or_default();

    let text = format!(
        "New Contact Form Submission\n\n\
         Name: {}\n\
         Email: {}\n\
         {}\n\
         Message:\n{}\n\n\
         ---\n\
         Sent from the Prime Accounting contact form",
        form.name, form.email, phone_text, form.message
    );

    let phone_row = form
        .phone
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            format!(
                "<tr><td style=\"padding:10px;background:#f9fafb;font-weight:bold\">Phone:</td>\
                 <td style=\"padding:10px\">{}</td></tr>",
                html_escape(p)
            )
        })
        .unwrap_or_default();

    let html = format!(
        "<div style=\"font-family:Arial,sans-serif;max-width:600px;margin:0 auto;padding:20px;\
         border:1px solid #e0e0e0;border-radius:10px\">\
         <h2 style=\"color:#EAB308;margin-bottom:20px\">New Contact Form Submission</h2>\
         <table style=\"width:100%;border-collapse:collapse\">\
         <tr><td style=\"padding:10px;background:#f9fafb;font-weight:bold;width:120px\">Name:</td>\
         <td style=\"padding:10px\">{}</td></tr>\
         <tr><td style=\"padding:10px;background:#f9fafb;font-weight:bold\">Email:</td>\
         <td style=\"padding:10px\"><a href=\"mailto:{}\" style=\"color:#EAB308\">{}</a></td></tr>\
         {}\
         <tr><td style=\"padding:10px;background:#f9fafb;font-weight:bold;vertical-align:top\">Message:</td>\
         <td style=\"padding:10px\">{}</td></tr>\
         </table>\
         <hr style=\"margin:20px 0;border:none;border-top:1px solid #e0e0e0\">\
         <p style=\"color:#6b7280;font-size:12px;margin:0\">Sent from the Prime Accounting contact form</p>\
         </div>",
        html_escape(&form.name),
        html_escape(&form.email),
        html_escape(&form.email),
        phone_row,
        html_escape(&form.message).replace('\n', "<br>"),
    );

    (text, html)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: Some("(555) 123-4567".to_string()),
            message: "Line one\nLine two".to_string(),
        }
    }

    #[test]
    fn test_bodies_include_all_fields() {
        let (text, html) = render_bodies(&form());
        assert!(text.contains("Name: Jane Doe"));
        assert!(text.contains("Email: jane@example.com"));
        assert!(text.contains("Phone: (555) 123-4567"));
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("mailto:jane@example.com"));
        assert!(html.contains("Line one<br>Line two"));
    }

    #[test]
    fn test_missing_phone_is_omitted() {
        let form = ContactForm {
            phone: None,
            ..form()
        };
        let (text, html) = render_bodies(&form);
        assert!(!text.contains("Phone:"));
        assert!(!html.contains("Phone:"));
    }

    #[test]
    fn test_html_body_escapes_markup() {
        let form = ContactForm {
            message: "<script>alert(1)</script> & more".to_string(),
            ..form()
        };
        let (_, html) = render_bodies(&form);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp; more"));
    }
}
