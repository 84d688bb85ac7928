//! Maklaro API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use maklaro_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = api_services::connect_and_migrate(&config.database_url).await?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let app_state = api_services::build_app_state(pool, &config)?;
    let router = api_router::build_router(app_state)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "maklaro-api listening");

    axum::serve(listener, router)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
