use super::*;

pub async fn provision_tenant_admin_handler(
    State(state): State<AppState>,
    Json(payload): Json<ProvisionTenantAdminRequest>,
) -> ApiResult<Json<ProvisionTenantAdminResponse>> {
    let tenant_id = uuid::Uuid::parse_str(payload.tenant_id.as_str())
        .map(TenantId::from_uuid)
        .map_err(|error| AppError::Validation(format!("invalid tenant_id: {error}")))?;

    let report = state
        .provisioning_service
        .provision_tenant_admin(
            PLATFORM_ACTOR,
            ProvisionTenantAdminInput {
                tenant_id,
                email: payload.email,
                first_name: payload.first_name,
                last_name: payload.last_name,
                phone: payload.phone,
                language: payload.language,
            },
        )
        .await?;

    Ok(Json(ProvisionTenantAdminResponse::from(report)))
}
