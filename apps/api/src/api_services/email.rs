use std::sync::Arc;

use maklaro_application::EmailService;
use maklaro_core::AppError;
use maklaro_infrastructure::{ConsoleEmailService, SmtpEmailConfig, SmtpEmailService};
use tracing::info;

use crate::api_config::{ApiConfig, EmailProviderConfig, SmtpRuntimeConfig};

pub(super) fn build_email_service(config: &ApiConfig) -> Result<Arc<dyn EmailService>, AppError> {
    match &config.email_provider {
        EmailProviderConfig::Console => {
            info!("email delivery: console (messages are logged, not sent)");
            Ok(Arc::new(ConsoleEmailService::new()))
        }
        EmailProviderConfig::Smtp(smtp) => {
            info!(host = %smtp.host, port = smtp.port, "email delivery: smtp relay");
            let service = SmtpEmailService::new(smtp_transport_config(smtp))?;
            Ok(Arc::new(service))
        }
    }
}

fn smtp_transport_config(smtp: &SmtpRuntimeConfig) -> SmtpEmailConfig {
    SmtpEmailConfig {
        host: smtp.host.clone(),
        port: smtp.port,
        username: smtp.username.clone(),
        password: smtp.password.clone(),
        from_address: smtp.from_address.clone(),
    }
}
