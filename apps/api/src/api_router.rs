use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use maklaro_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState) -> Result<Router, AppError> {
    let platform_routes = Router::new()
        .route(
            "/api/platform/tenant-admins",
            post(handlers::platform::provision_tenant_admin_handler),
        )
        .route(
            "/api/platform/role-templates",
            get(handlers::platform::list_role_templates_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_platform_owner,
        ));

    let cors_layer = cors::build_cors_layer(&app_state.console_url)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(platform_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
