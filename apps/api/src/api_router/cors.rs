use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use maklaro_core::AppError;
use tower_http::cors::CorsLayer;

pub(super) fn build_cors_layer(console_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(console_url)
                .map_err(|error| AppError::Internal(format!("invalid CONSOLE_URL: {error}")))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}
