//! Console email service for development. Logs emails to tracing output.

use async_trait::async_trait;

use maklaro_application::EmailService;
use maklaro_core::AppResult;
use tracing::info;

/// Development email service that prints messages instead of sending them.
///
/// Setup links land in the process log, so a local operator can copy the
/// URL straight out of the terminal.
#[derive(Clone)]
pub struct ConsoleEmailService;

impl ConsoleEmailService {
    /// Creates a new console email service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for ConsoleEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: Option<&str>,
    ) -> AppResult<()> {
        info!(
            to,
            subject,
            has_html_part = html_body.is_some(),
            "--- EMAIL (console) ---\n{text_body}\n--- END EMAIL ---"
        );

        Ok(())
    }
}
