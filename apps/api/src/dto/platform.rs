use maklaro_application::{ProvisioningOutcome, ProvisioningReport};
use maklaro_domain::{Permission, RoleTemplate, RoleTemplateRegistry};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for tenant administrator provisioning.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/console-types/src/generated/provision-tenant-admin-request.ts"
)]
pub struct ProvisionTenantAdminRequest {
    pub tenant_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub language: Option<String>,
}

/// Outcome of a tenant administrator provisioning call.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/console-types/src/generated/provision-tenant-admin-response.ts"
)]
pub struct ProvisionTenantAdminResponse {
    pub success: bool,
    pub user_id: String,
    pub email: String,
    pub tenant_id: String,
    pub is_new_user: bool,
    pub roles_initialized: bool,
    pub admin_role_assigned: bool,
    pub already_assigned: bool,
    pub subdomain: String,
    pub message: String,
    pub notification_error: Option<String>,
}

/// API representation of one default role template.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/console-types/src/generated/role-template-response.ts"
)]
pub struct RoleTemplateResponse {
    pub name: String,
    pub description: String,
    pub dashboard_scope: String,
    pub sees_own_commissions: bool,
    pub sees_team_commissions: bool,
    pub sees_all_commissions: bool,
    pub permissions: Vec<String>,
    pub is_org_admin: bool,
}

/// The full default role catalog served to the platform console.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/console-types/src/generated/role-template-catalog-response.ts"
)]
pub struct RoleTemplateCatalogResponse {
    pub version: u32,
    pub templates: Vec<RoleTemplateResponse>,
}

impl From<ProvisioningReport> for ProvisionTenantAdminResponse {
    fn from(value: ProvisioningReport) -> Self {
        let message = value.message();
        let already_assigned = matches!(value.outcome, ProvisioningOutcome::AlreadyProvisioned);

        Self {
            success: true,
            user_id: value.user_id.to_string(),
            email: value.email,
            tenant_id: value.tenant_id.to_string(),
            is_new_user: matches!(value.outcome, ProvisioningOutcome::NewUserCreated),
            roles_initialized: value.roles_initialized,
            admin_role_assigned: !already_assigned,
            already_assigned,
            subdomain: value.tenant_slug,
            message,
            notification_error: value.handoff.failure,
        }
    }
}

impl From<&RoleTemplate> for RoleTemplateResponse {
    fn from(value: &RoleTemplate) -> Self {
        let visibility = value.commission_visibility();

        Self {
            name: value.name().as_str().to_owned(),
            description: value.description().as_str().to_owned(),
            dashboard_scope: value.dashboard_scope().as_str().to_owned(),
            sees_own_commissions: visibility.sees_own(),
            sees_team_commissions: visibility.sees_team(),
            sees_all_commissions: visibility.sees_all(),
            permissions: value.grants().iter().map(Permission::storage_value).collect(),
            is_org_admin: value.is_org_admin(),
        }
    }
}

impl From<&RoleTemplateRegistry> for RoleTemplateCatalogResponse {
    fn from(value: &RoleTemplateRegistry) -> Self {
        Self {
            version: value.version(),
            templates: value.templates().iter().map(RoleTemplateResponse::from).collect(),
        }
    }
}
