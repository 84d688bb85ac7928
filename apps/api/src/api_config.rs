use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use maklaro_core::AppError;
use tracing_subscriber::EnvFilter;

/// SMTP relay settings for outbound mail.
#[derive(Debug, Clone)]
pub struct SmtpRuntimeConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

/// Which email delivery backend the process wires in.
#[derive(Debug, Clone)]
pub enum EmailProviderConfig {
    Console,
    Smtp(SmtpRuntimeConfig),
}

/// Runtime configuration for the API process, read once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub console_url: String,
    pub tenant_base_domain: String,
    pub platform_owner_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub email_provider: EmailProviderConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let console_url =
            env::var("CONSOLE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let tenant_base_domain = required_non_empty_env("TENANT_BASE_DOMAIN")?;

        let platform_owner_token = required_env("PLATFORM_OWNER_TOKEN")?;
        if platform_owner_token.len() < 32 {
            return Err(AppError::Validation(
                "PLATFORM_OWNER_TOKEN must be at least 32 characters".to_owned(),
            ));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let email_provider = match env::var("EMAIL_PROVIDER")
            .unwrap_or_else(|_| "console".to_owned())
            .as_str()
        {
            "console" => EmailProviderConfig::Console,
            "smtp" => {
                let port = required_non_empty_env("SMTP_PORT")?
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid SMTP_PORT: {error}")))?;
                EmailProviderConfig::Smtp(SmtpRuntimeConfig {
                    host: required_non_empty_env("SMTP_HOST")?,
                    port,
                    username: required_non_empty_env("SMTP_USERNAME")?,
                    password: required_non_empty_env("SMTP_PASSWORD")?,
                    from_address: required_non_empty_env("SMTP_FROM_ADDRESS")?,
                })
            }
            other => {
                return Err(AppError::Validation(format!(
                    "EMAIL_PROVIDER must be either 'console' or 'smtp', got '{other}'"
                )));
            }
        };

        Ok(Self {
            migrate_only,
            database_url,
            console_url,
            tenant_base_domain,
            platform_owner_token,
            api_host,
            api_port,
            email_provider,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
