use std::sync::Arc;

use maklaro_core::{AppError, AppResult, TenantId};
use maklaro_domain::{AuditAction, EmailAddress, RoleId, Tenant, UserId, UserProfile};

use super::handoff::{CredentialHandoffOutcome, CredentialHandoffService};
use super::identity::IdentityService;
use super::role_bootstrap::{RoleBootstrapOutcome, RoleBootstrapService};
use crate::provisioning_ports::{AuditEvent, AuditRepository, MembershipStore, TenantDirectory};

/// Language recorded when the request does not carry one.
const DEFAULT_LANGUAGE: &str = "en";

/// Input for provisioning a tenant administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionTenantAdminInput {
    /// Target tenant.
    pub tenant_id: TenantId,
    /// Administrator email address.
    pub email: String,
    /// First name; may be blank.
    pub first_name: String,
    /// Last name; may be blank.
    pub last_name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional preferred language.
    pub language: Option<String>,
}

/// How the workflow classified the provisioned administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningOutcome {
    /// A fresh identity was created and granted admin access.
    NewUserCreated,
    /// An existing identity was linked to the tenant or granted the role.
    ExistingUserLinked,
    /// Identity, membership and admin role were already all in place.
    AlreadyProvisioned,
}

impl ProvisioningOutcome {
    /// Returns a stable storage value for this outcome.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewUserCreated => "new_user_created",
            Self::ExistingUserLinked => "existing_user_linked",
            Self::AlreadyProvisioned => "already_provisioned",
        }
    }
}

/// Result of a tenant-admin provisioning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningReport {
    /// How the administrator was classified.
    pub outcome: ProvisioningOutcome,
    /// Provisioned user identifier.
    pub user_id: UserId,
    /// Canonical administrator email.
    pub email: String,
    /// Target tenant.
    pub tenant_id: TenantId,
    /// Tenant routing slug for the public portal.
    pub tenant_slug: String,
    /// Admin role granted inside the tenant.
    pub admin_role_id: RoleId,
    /// Whether this call materialized the tenant's roles.
    pub roles_initialized: bool,
    /// System roles left without permission rows by bootstrap.
    pub degraded_roles: Vec<String>,
    /// Credential handoff delivery outcome.
    pub handoff: CredentialHandoffOutcome,
}

impl ProvisioningReport {
    /// Human-readable summary for the platform-owner console.
    #[must_use]
    pub fn message(&self) -> String {
        match self.outcome {
            ProvisioningOutcome::NewUserCreated => {
                if self.handoff.sent {
                    format!(
                        "Created administrator {} and emailed them a credential setup link.",
                        self.email
                    )
                } else {
                    format!(
                        "Created administrator {}; the credential setup email could not be delivered.",
                        self.email
                    )
                }
            }
            ProvisioningOutcome::ExistingUserLinked => {
                if self.handoff.sent {
                    format!(
                        "Linked existing user {} as administrator and emailed them a credential setup link.",
                        self.email
                    )
                } else {
                    format!(
                        "Linked existing user {} as administrator; the credential setup email could not be delivered.",
                        self.email
                    )
                }
            }
            ProvisioningOutcome::AlreadyProvisioned => format!(
                "{} is already an administrator of this tenant; no new setup link was sent.",
                self.email
            ),
        }
    }
}

/// Entry point for the tenant-admin provisioning workflow.
///
/// Steps run strictly in sequence because each depends on state produced by
/// the previous one. Steps up to role assignment must succeed; the
/// credential handoff is best-effort and never fails the call.
#[derive(Clone)]
pub struct TenantProvisioningService {
    tenants: Arc<dyn TenantDirectory>,
    role_bootstrap: RoleBootstrapService,
    identity_service: IdentityService,
    memberships: Arc<dyn MembershipStore>,
    handoff: CredentialHandoffService,
    audit: Arc<dyn AuditRepository>,
}

impl TenantProvisioningService {
    /// Creates a new provisioning orchestrator.
    #[must_use]
    pub fn new(
        tenants: Arc<dyn TenantDirectory>,
        role_bootstrap: RoleBootstrapService,
        identity_service: IdentityService,
        memberships: Arc<dyn MembershipStore>,
        handoff: CredentialHandoffService,
        audit: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            tenants,
            role_bootstrap,
            identity_service,
            memberships,
            handoff,
            audit,
        }
    }

    /// Provisions a tenant administrator end to end.
    ///
    /// Safe to retry with identical inputs: every write along the way is an
    /// idempotent upsert, and a replay against fully provisioned state
    /// short-circuits without sending another setup link.
    pub async fn provision_tenant_admin(
        &self,
        actor: &str,
        input: ProvisionTenantAdminInput,
    ) -> AppResult<ProvisioningReport> {
        let email = EmailAddress::new(input.email)?;

        let tenant = self
            .tenants
            .find_tenant(input.tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("tenant {} does not exist", input.tenant_id))
            })?;

        let bootstrap = self
            .role_bootstrap
            .ensure_roles_bootstrapped(tenant.id())
            .await?;

        if !bootstrap.already_bootstrapped {
            self.record_roles_bootstrapped(&tenant, actor, &bootstrap)
                .await;
        }

        let profile = UserProfile::from_parts(input.first_name, input.last_name, input.phone);
        let language = input
            .language
            .map(|language| language.trim().to_lowercase())
            .filter(|language| !language.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned());

        let resolved = self
            .identity_service
            .resolve_or_create(&email, &profile, &language)
            .await?;
        let user_id = resolved.identity.id;

        if resolved.is_new {
            self.record_audit(AuditEvent {
                tenant_id: tenant.id(),
                actor: actor.to_owned(),
                action: AuditAction::IdentityCreated,
                resource_type: "user_identity".to_owned(),
                resource_id: user_id.to_string(),
                detail: Some(format!("created identity for '{}'", email.as_str())),
            })
            .await;
        }

        let membership_created = self
            .memberships
            .ensure_membership(tenant.id(), user_id)
            .await?;

        if membership_created {
            self.record_audit(AuditEvent {
                tenant_id: tenant.id(),
                actor: actor.to_owned(),
                action: AuditAction::MembershipLinked,
                resource_type: "tenant_membership".to_owned(),
                resource_id: format!("{}:{user_id}", tenant.id()),
                detail: None,
            })
            .await;
        }

        if !membership_created
            && self
                .memberships
                .role_assignment_exists(tenant.id(), user_id, bootstrap.admin_role_id)
                .await?
        {
            // Idempotent replay: everything is in place, so do not spam the
            // administrator with another setup link.
            return Ok(ProvisioningReport {
                outcome: ProvisioningOutcome::AlreadyProvisioned,
                user_id,
                email: email.as_str().to_owned(),
                tenant_id: tenant.id(),
                tenant_slug: tenant.slug().as_str().to_owned(),
                admin_role_id: bootstrap.admin_role_id,
                roles_initialized: !bootstrap.already_bootstrapped,
                degraded_roles: bootstrap.degraded_roles,
                handoff: CredentialHandoffOutcome::skipped(),
            });
        }

        let assignment_created = self
            .memberships
            .ensure_role_assignment(tenant.id(), user_id, bootstrap.admin_role_id, actor)
            .await?;

        if assignment_created {
            self.record_audit(AuditEvent {
                tenant_id: tenant.id(),
                actor: actor.to_owned(),
                action: AuditAction::AdminRoleAssigned,
                resource_type: "tenant_role_assignment".to_owned(),
                resource_id: format!("{user_id}:{}", bootstrap.admin_role_id),
                detail: Some("granted the organization admin role".to_owned()),
            })
            .await;
        }

        let handoff = self
            .handoff
            .send_credential_handoff(email.as_str(), &tenant)
            .await;
        self.record_handoff(&tenant, actor, email.as_str(), &handoff)
            .await;

        let outcome = if resolved.is_new {
            ProvisioningOutcome::NewUserCreated
        } else {
            ProvisioningOutcome::ExistingUserLinked
        };

        Ok(ProvisioningReport {
            outcome,
            user_id,
            email: email.as_str().to_owned(),
            tenant_id: tenant.id(),
            tenant_slug: tenant.slug().as_str().to_owned(),
            admin_role_id: bootstrap.admin_role_id,
            roles_initialized: !bootstrap.already_bootstrapped,
            degraded_roles: bootstrap.degraded_roles,
            handoff,
        })
    }

    async fn record_roles_bootstrapped(
        &self,
        tenant: &Tenant,
        actor: &str,
        bootstrap: &RoleBootstrapOutcome,
    ) {
        let detail = if bootstrap.degraded_roles.is_empty() {
            "materialized all template roles".to_owned()
        } else {
            format!(
                "materialized template roles with degraded grants: {}",
                bootstrap.degraded_roles.join(", ")
            )
        };

        self.record_audit(AuditEvent {
            tenant_id: tenant.id(),
            actor: actor.to_owned(),
            action: AuditAction::RolesBootstrapped,
            resource_type: "tenant_roles".to_owned(),
            resource_id: tenant.id().to_string(),
            detail: Some(detail),
        })
        .await;
    }

    async fn record_handoff(
        &self,
        tenant: &Tenant,
        actor: &str,
        email: &str,
        handoff: &CredentialHandoffOutcome,
    ) {
        let (action, detail) = if handoff.sent {
            (AuditAction::CredentialHandoffSent, None)
        } else {
            (
                AuditAction::CredentialHandoffFailed,
                handoff.failure.clone(),
            )
        };

        self.record_audit(AuditEvent {
            tenant_id: tenant.id(),
            actor: actor.to_owned(),
            action,
            resource_type: "credential_handoff".to_owned(),
            resource_id: email.to_owned(),
            detail,
        })
        .await;
    }

    /// Appends an audit event without letting audit failures break a
    /// provisioning call that already succeeded.
    async fn record_audit(&self, event: AuditEvent) {
        if let Err(error) = self.audit.append_event(event).await {
            tracing::warn!(%error, "failed to append provisioning audit event");
        }
    }
}
