use std::sync::Arc;

use maklaro_core::{AppError, AppResult, TenantId};
use maklaro_domain::{RoleId, RoleTemplateRegistry};

use crate::provisioning_ports::{RoleSeed, RoleStore};

/// Outcome of a role bootstrap pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBootstrapOutcome {
    /// Whether the tenant already had roles before this call.
    pub already_bootstrapped: bool,
    /// Identifier of the organization admin role.
    pub admin_role_id: RoleId,
    /// Names of system roles left without permission rows. Non-empty means
    /// the tenant is usable but under-permissioned for those roles.
    pub degraded_roles: Vec<String>,
}

/// Materializes the template catalog into tenant-scoped roles, exactly once
/// per tenant.
#[derive(Clone)]
pub struct RoleBootstrapService {
    registry: Arc<RoleTemplateRegistry>,
    role_store: Arc<dyn RoleStore>,
}

impl RoleBootstrapService {
    /// Creates a new role bootstrap service.
    #[must_use]
    pub fn new(registry: Arc<RoleTemplateRegistry>, role_store: Arc<dyn RoleStore>) -> Self {
        Self {
            registry,
            role_store,
        }
    }

    /// Ensures the tenant owns a persisted copy of every template role.
    ///
    /// The role-count check is an optimization; correctness comes from the
    /// store's uniqueness constraints, so a concurrent bootstrap of the same
    /// tenant cannot duplicate rows. A failing count query fails the whole
    /// call outright.
    pub async fn ensure_roles_bootstrapped(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<RoleBootstrapOutcome> {
        let existing_roles = self.role_store.count_roles(tenant_id).await?;

        if existing_roles > 0 {
            return self.verify_existing_bootstrap(tenant_id).await;
        }

        self.materialize_templates(tenant_id).await
    }

    /// Resolves the admin role for a tenant that already has roles.
    ///
    /// The lookup must not assume the earlier bootstrap completed cleanly:
    /// a missing admin role despite other roles existing is a reportable
    /// inconsistency, never a silent no-op.
    async fn verify_existing_bootstrap(
        &self,
        tenant_id: TenantId,
    ) -> AppResult<RoleBootstrapOutcome> {
        let admin_name = self.registry.admin_template().name().as_str();

        let admin_role = self
            .role_store
            .find_role_by_name(tenant_id, admin_name)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "tenant {tenant_id} has roles but none named '{admin_name}'; \
                     bootstrap state is inconsistent"
                ))
            })?;

        let degraded_roles = self
            .role_store
            .list_roles_missing_permissions(tenant_id)
            .await?;

        if !degraded_roles.is_empty() {
            tracing::warn!(
                %tenant_id,
                roles = ?degraded_roles,
                "tenant has system roles without permission rows"
            );
        }

        Ok(RoleBootstrapOutcome {
            already_bootstrapped: true,
            admin_role_id: admin_role.id,
            degraded_roles,
        })
    }

    /// Materializes every catalog template for a fresh tenant.
    ///
    /// A failure while attaching one role's permissions degrades that role
    /// and moves on; aborting would leave the remaining roles missing too.
    /// Only a failure to create the admin role itself is fatal, since every
    /// later provisioning step needs its identifier.
    async fn materialize_templates(&self, tenant_id: TenantId) -> AppResult<RoleBootstrapOutcome> {
        let mut admin_role_id: Option<RoleId> = None;
        let mut degraded_roles = Vec::new();

        for template in self.registry.templates() {
            let seed = RoleSeed::from_template(template);

            let role = match self.role_store.upsert_role(tenant_id, &seed).await {
                Ok(role) => role,
                Err(error) => {
                    if template.is_org_admin() {
                        return Err(error);
                    }

                    tracing::warn!(
                        %tenant_id,
                        role = %seed.name,
                        %error,
                        "failed to materialize template role, continuing with the rest"
                    );
                    degraded_roles.push(seed.name);
                    continue;
                }
            };

            if let Err(error) = self
                .role_store
                .insert_role_permissions(role.id, template.grants())
                .await
            {
                tracing::warn!(
                    %tenant_id,
                    role = %role.name,
                    %error,
                    "failed to attach role permissions, continuing with the rest"
                );
                degraded_roles.push(role.name.clone());
            }

            if template.is_org_admin() {
                admin_role_id = Some(role.id);
            }
        }

        let admin_role_id = admin_role_id.ok_or_else(|| {
            AppError::Internal(format!(
                "bootstrap for tenant {tenant_id} produced no admin role"
            ))
        })?;

        Ok(RoleBootstrapOutcome {
            already_bootstrapped: false,
            admin_role_id,
            degraded_roles,
        })
    }
}
