pub mod templates;

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{SmtpConfig, TlsMode};
use crate::models::Contact;

/// Fixed wait between delivery attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Timeout on the outbound SMTP connection so a stuck relay cannot pin the
/// notification task indefinitely.
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound notification channel. Behind a trait so tests can substitute a
/// recording or failing double for the real relay.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, contact: &Contact) -> Result<(), String>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    to: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let transport = build_smtp_transport(config)?;

        Ok(Self {
            transport,
            from: format!("Website Contact Form <{}>", config.from),
            to: config.to.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, contact: &Contact) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(self
                .to
                .parse()
                .map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(format!("New Contact Form Submission from {}", contact.name))
            .multipart(MultiPart::alternative_plain_html(
                templates::render_text(contact),
                templates::render_html(contact),
            ))
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}

fn build_smtp_transport(
    config: &SmtpConfig,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, String> {
    let creds = Credentials::new(config.user.clone(), config.pass.clone());

    let transport = match config.tls_mode {
        TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| format!("SMTP relay error: {e}"))?,
        TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
        TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("SMTP starttls error: {e}"))?,
    }
    .port(config.port)
    .credentials(creds)
    .timeout(Some(SMTP_TIMEOUT))
    .build();

    Ok(transport)
}

/// Drive the mailer with up to `max_retries` extra attempts, waiting a fixed
/// delay between them. Returns the last error when every attempt fails.
pub async fn notify_with_retry(
    mailer: &dyn Mailer,
    contact: &Contact,
    max_retries: u32,
) -> Result<(), String> {
    let mut last_error = String::new();

    for attempt in 0..=max_retries {
        match mailer.send(contact).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::warn!(
                    "Email delivery attempt {} of {} failed for contact {}: {e}",
                    attempt + 1,
                    max_retries + 1,
                    contact.id
                );
                last_error = e;
            }
        }

        if attempt < max_retries {
            tokio::time::sleep(RETRY_DELAY).await;
        }
    }

    Err(last_error)
}
