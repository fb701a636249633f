//! Verification-code delivery over SMTP.
//!
//! When SMTP is unconfigured (local development, tests) the mailer logs
//! the code instead of sending it, so registration still completes.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: Option<String>,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Sender address, e.g. `Hostelgate <no-reply@example.edu>`.
    pub from_address: String,
}

impl MailConfig {
    /// Load from `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`, and
    /// `MAIL_FROM`. With `SMTP_HOST` unset the mailer runs in log-only
    /// mode.
    pub fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("SMTP_HOST").ok().filter(|v| !v.is_empty()),
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Hostelgate <no-reply@localhost>".into()),
        }
    }
}

/// Sends verification codes, or logs them when SMTP is unconfigured.
pub struct Mailer {
    from_address: String,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl Mailer {
    /// Build a mailer from config.
    ///
    /// # Panics
    ///
    /// Panics on an unusable SMTP host, matching how the rest of the
    /// startup config handles bad values.
    pub fn new(config: &MailConfig) -> Self {
        let transport = config.smtp_host.as_deref().map(|host| {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .expect("SMTP_HOST must be a valid relay host")
                .credentials(Credentials::new(
                    config.smtp_username.clone(),
                    config.smtp_password.clone(),
                ))
                .build()
        });
        Self {
            from_address: config.from_address.clone(),
            transport,
        }
    }

    /// A log-only mailer for tests.
    pub fn disabled() -> Self {
        Self {
            from_address: "Hostelgate <no-reply@localhost>".into(),
            transport: None,
        }
    }

    /// Deliver a verification code. Delivery failures are logged, not
    /// surfaced: the code store is authoritative and a user can request a
    /// resend by registering again.
    pub async fn send_verification_code(&self, to: &str, code: &str) {
        let Some(transport) = &self.transport else {
            tracing::info!(to, code, "SMTP disabled; verification code logged");
            return;
        };

        let message = Message::builder()
            .from(self.from_address.parse().expect("MAIL_FROM must be a valid mailbox"))
            .to(match to.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    tracing::warn!(to, error = %e, "Unmailable address; skipping delivery");
                    return;
                }
            })
            .subject("Your hostel account verification code")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Your verification code is {code}. It expires shortly; enter it on the \
                 verification screen to activate your account."
            ))
            .expect("verification email must build");

        if let Err(e) = transport.send(message).await {
            tracing::error!(to, error = %e, "Verification email delivery failed");
        }
    }
}
