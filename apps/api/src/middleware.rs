use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use maklaro_core::AppError;

use crate::error::ApiResult;
use crate::state::AppState;

/// Gate for `/api/platform/*` routes.
///
/// The caller must present `Authorization: Bearer <PLATFORM_OWNER_TOKEN>`
/// exactly; there are no per-user platform accounts behind this surface.
pub async fn require_platform_owner(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("platform owner token required".to_owned()))?;

    if token != state.platform_owner_token {
        return Err(AppError::Unauthorized("invalid platform owner token".to_owned()).into());
    }

    Ok(next.run(request).await)
}
