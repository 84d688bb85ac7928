use async_trait::async_trait;

use maklaro_core::{AppResult, TenantId};
use maklaro_domain::{Permission, RoleId, Tenant, UserId, UserProfile};

use super::audit::AuditEvent;
use super::identities::{NewIdentity, UserIdentity};
use super::roles::{RoleSeed, TenantRole};

/// Repository port for reading pre-provisioned tenants.
///
/// Tenant creation belongs to a separate onboarding flow; this workflow
/// never writes tenant rows.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Finds a tenant by identifier.
    async fn find_tenant(&self, tenant_id: TenantId) -> AppResult<Option<Tenant>>;
}

/// Repository port for tenant role materialization.
///
/// Every write is an upsert on a uniqueness key; a colliding insert means
/// the row already exists and is never surfaced as an error.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Counts roles owned by a tenant.
    async fn count_roles(&self, tenant_id: TenantId) -> AppResult<i64>;

    /// Finds a tenant role by its unique name.
    async fn find_role_by_name(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> AppResult<Option<TenantRole>>;

    /// Inserts a role if absent and returns the persisted row either way.
    async fn upsert_role(&self, tenant_id: TenantId, seed: &RoleSeed) -> AppResult<TenantRole>;

    /// Attaches permission rows to a role. Grants that already exist are
    /// left untouched.
    async fn insert_role_permissions(
        &self,
        role_id: RoleId,
        grants: &[Permission],
    ) -> AppResult<()>;

    /// Lists names of system roles that have no permission rows attached,
    /// so incomplete bootstrap passes stay visible on later calls.
    async fn list_roles_missing_permissions(&self, tenant_id: TenantId) -> AppResult<Vec<String>>;
}

/// Repository port for global user identities.
///
/// Email uniqueness is enforced here, not by callers; "identity already
/// exists for this email" is a normal branch of every method that creates.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Finds an identity by email. Lookups are case-insensitive because
    /// stored emails are lowercased.
    async fn find_identity_by_email(&self, email: &str) -> AppResult<Option<UserIdentity>>;

    /// Inserts a new identity. Returns `None` when another identity already
    /// owns the email, so callers can re-fetch the winning row.
    async fn insert_identity(&self, identity: &NewIdentity) -> AppResult<Option<UserIdentity>>;

    /// Replaces the stored profile fields for an identity.
    async fn update_profile(&self, user_id: UserId, profile: &UserProfile) -> AppResult<()>;

    /// Raises a client-tier identity to staff tier. A no-op for identities
    /// that are already staff.
    async fn promote_to_staff(&self, user_id: UserId) -> AppResult<()>;

    /// Persists a one-time credential setup token. Only the token hash is
    /// stored; the raw token lives in the emailed link alone.
    async fn store_credential_setup_token(
        &self,
        email: &str,
        token_hash: &str,
        redirect_url: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<()>;
}

/// Repository port for tenant memberships and role assignments.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Links a user to a tenant. Returns whether a new row was inserted.
    async fn ensure_membership(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<bool>;

    /// Checks whether the user already holds the given role in the tenant.
    async fn role_assignment_exists(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: RoleId,
    ) -> AppResult<bool>;

    /// Grants a role to a user within a tenant, recording who performed the
    /// assignment. Returns whether a new row was inserted.
    async fn ensure_role_assignment(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: RoleId,
        assigned_by: &str,
    ) -> AppResult<bool>;
}

/// Repository port for append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends a single audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
