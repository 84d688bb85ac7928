use std::sync::Arc;

use maklaro_application::{
    AuditRepository, CredentialHandoffService, IdentityProvider, IdentityService, MembershipStore,
    RoleBootstrapService, RoleStore, SecretHasher, TenantDirectory, TenantProvisioningService,
};
use maklaro_core::AppError;
use maklaro_domain::RoleTemplateRegistry;
use maklaro_infrastructure::{
    Argon2SecretHasher, PostgresAuditRepository, PostgresIdentityProvider, PostgresMembershipStore,
    PostgresRoleStore, PostgresTenantDirectory,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

use super::email::build_email_service;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    // An invalid role catalog must stop the process here, not surface later
    // inside a provisioning call.
    let role_templates = Arc::new(RoleTemplateRegistry::builtin()?);
    let email_service = build_email_service(config)?;

    let tenants: Arc<dyn TenantDirectory> = Arc::new(PostgresTenantDirectory::new(pool.clone()));
    let role_store: Arc<dyn RoleStore> = Arc::new(PostgresRoleStore::new(pool.clone()));
    let identities: Arc<dyn IdentityProvider> =
        Arc::new(PostgresIdentityProvider::new(pool.clone()));
    let memberships: Arc<dyn MembershipStore> =
        Arc::new(PostgresMembershipStore::new(pool.clone()));
    let audit: Arc<dyn AuditRepository> = Arc::new(PostgresAuditRepository::new(pool.clone()));
    let secret_hasher: Arc<dyn SecretHasher> = Arc::new(Argon2SecretHasher::new());

    let role_bootstrap = RoleBootstrapService::new(role_templates.clone(), role_store);
    let identity_service = IdentityService::new(identities.clone(), secret_hasher);
    let handoff = CredentialHandoffService::new(
        identities,
        email_service,
        config.tenant_base_domain.clone(),
    );

    Ok(AppState {
        provisioning_service: TenantProvisioningService::new(
            tenants,
            role_bootstrap,
            identity_service,
            memberships,
            handoff,
            audit,
        ),
        role_templates,
        platform_owner_token: config.platform_owner_token.clone(),
        console_url: config.console_url.clone(),
        postgres_pool: pool,
    })
}
