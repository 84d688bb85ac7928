use axum::Json;
use axum::extract::State;
use maklaro_application::ProvisionTenantAdminInput;
use maklaro_core::{AppError, TenantId};

use crate::dto::{
    ProvisionTenantAdminRequest, ProvisionTenantAdminResponse, RoleTemplateCatalogResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

/// Actor recorded on audit events written from this surface.
const PLATFORM_ACTOR: &str = "platform-owner";

mod admins;
mod templates;

pub use admins::provision_tenant_admin_handler;
pub use templates::list_role_templates_handler;
