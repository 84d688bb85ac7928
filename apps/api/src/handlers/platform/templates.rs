use super::*;

pub async fn list_role_templates_handler(
    State(state): State<AppState>,
) -> Json<RoleTemplateCatalogResponse> {
    Json(RoleTemplateCatalogResponse::from(state.role_templates.as_ref()))
}
