use super::checks::{check_postgres, check_role_templates};
use super::*;

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let postgres = check_postgres(state.postgres_pool.clone()).await;
    let role_templates = check_role_templates();

    let ready = is_healthy(postgres.status) && is_healthy(role_templates.status);
    let status = if ready { "ok" } else { "degraded" };
    let http_status = if ready {
        StatusCode::OK
    } else {
        tracing::warn!(
            postgres = postgres.status,
            role_templates = role_templates.status,
            "health check reporting degraded"
        );
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status,
            ready,
            postgres,
            role_templates,
        }),
    )
}

fn is_healthy(status: &str) -> bool {
    status == "ok"
}
