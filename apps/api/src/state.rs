use std::sync::Arc;

use maklaro_application::TenantProvisioningService;
use maklaro_domain::RoleTemplateRegistry;
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub provisioning_service: TenantProvisioningService,
    pub role_templates: Arc<RoleTemplateRegistry>,
    pub platform_owner_token: String,
    pub console_url: String,
    pub postgres_pool: PgPool,
}
