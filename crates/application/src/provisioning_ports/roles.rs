use maklaro_core::TenantId;
use maklaro_domain::{CommissionVisibility, DashboardScope, RoleId, RoleTemplate};

/// Tenant role record as persisted by the role store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRole {
    /// Stable role identifier.
    pub id: RoleId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Unique role name in tenant scope.
    pub name: String,
    /// Human description.
    pub description: String,
    /// Indicates a system-managed role materialized from a template.
    pub is_system: bool,
    /// Dashboard scope for role holders.
    pub dashboard_scope: DashboardScope,
    /// Commission visibility flags for role holders.
    pub commission_visibility: CommissionVisibility,
}

/// Input payload for materializing a catalog template into a tenant role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSeed {
    /// Unique role name in tenant scope.
    pub name: String,
    /// Human description.
    pub description: String,
    /// Marks the row as system-managed.
    pub is_system: bool,
    /// Dashboard scope for role holders.
    pub dashboard_scope: DashboardScope,
    /// Commission visibility flags for role holders.
    pub commission_visibility: CommissionVisibility,
}

impl RoleSeed {
    /// Builds a seed from a catalog template. Materialized template roles
    /// are always system-managed.
    #[must_use]
    pub fn from_template(template: &RoleTemplate) -> Self {
        Self {
            name: template.name().as_str().to_owned(),
            description: template.description().as_str().to_owned(),
            is_system: true,
            dashboard_scope: template.dashboard_scope(),
            commission_visibility: template.commission_visibility(),
        }
    }
}
