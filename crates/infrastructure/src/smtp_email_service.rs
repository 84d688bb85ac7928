//! SMTP email service using the `lettre` crate.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use maklaro_application::EmailService;
use maklaro_core::{AppError, AppResult};

/// SMTP email service configuration.
#[derive(Clone)]
pub struct SmtpEmailConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// SMTP username.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Sender email address.
    pub from_address: String,
}

/// Production email service delivering over SMTP.
///
/// The transport is built once at startup; lettre pools connections behind
/// it, so cloning the service is cheap.
#[derive(Clone)]
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpEmailService {
    /// Creates a new SMTP email service from the provided configuration.
    pub fn new(config: SmtpEmailConfig) -> AppResult<Self> {
        let credentials = Credentials::new(config.username, config.password);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(config.host.as_str())
            .map_err(|error| {
                AppError::Configuration(format!("failed to create SMTP transport: {error}"))
            })?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address,
        })
    }
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        _html_body: Option<&str>,
    ) -> AppResult<()> {
        let from = self
            .from_address
            .parse()
            .map_err(|error| AppError::Internal(format!("invalid from address: {error}")))?;

        let to_mailbox = to
            .parse()
            .map_err(|error| AppError::Internal(format!("invalid recipient address: {error}")))?;

        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(text_body.to_owned())
            .map_err(|error| AppError::Internal(format!("failed to build email: {error}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|error| AppError::Internal(format!("failed to send email: {error}")))?;

        Ok(())
    }
}
