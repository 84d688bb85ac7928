//! Authorization primitives materialized into tenant roles.

use std::str::FromStr;

use maklaro_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tenant role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a new random role identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a role identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Functional modules of the brokerage CRM that permissions attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    /// Client records and contact data.
    Clients,
    /// Insurance policies and contracts.
    Policies,
    /// Commission statements and settlements.
    Commissions,
    /// Marketing and renewal campaigns.
    Campaigns,
    /// Uploaded documents and attachments.
    Documents,
    /// Reporting and exports.
    Reports,
    /// Tenant user administration.
    Users,
    /// Tenant configuration.
    Settings,
}

impl Module {
    /// Returns a stable storage value for this module.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Policies => "policies",
            Self::Commissions => "commissions",
            Self::Campaigns => "campaigns",
            Self::Documents => "documents",
            Self::Reports => "reports",
            Self::Users => "users",
            Self::Settings => "settings",
        }
    }

    /// Returns all known modules in catalog order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Module] = &[
            Module::Clients,
            Module::Policies,
            Module::Commissions,
            Module::Campaigns,
            Module::Documents,
            Module::Reports,
            Module::Users,
            Module::Settings,
        ];

        ALL
    }
}

impl FromStr for Module {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "clients" => Ok(Self::Clients),
            "policies" => Ok(Self::Policies),
            "commissions" => Ok(Self::Commissions),
            "campaigns" => Ok(Self::Campaigns),
            "documents" => Ok(Self::Documents),
            "reports" => Ok(Self::Reports),
            "users" => Ok(Self::Users),
            "settings" => Ok(Self::Settings),
            _ => Err(AppError::Validation(format!("unknown module '{value}'"))),
        }
    }
}

/// Actions a role may perform within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read access.
    View,
    /// Create new records.
    Create,
    /// Update existing records.
    Edit,
    /// Delete records.
    Delete,
}

impl Action {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    /// Returns all known actions in catalog order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Action] = &[Action::View, Action::Create, Action::Edit, Action::Delete];

        ALL
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "view" => Ok(Self::View),
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!("unknown action '{value}'"))),
        }
    }
}

/// One `(module, action)` grant carried by a role.
///
/// Persisted as a dotted storage value such as `clients.view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    module: Module,
    action: Action,
}

impl Permission {
    /// Creates a permission grant.
    #[must_use]
    pub fn new(module: Module, action: Action) -> Self {
        Self { module, action }
    }

    /// Returns the module this grant applies to.
    #[must_use]
    pub fn module(&self) -> Module {
        self.module
    }

    /// Returns the granted action.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// Returns the dotted storage value, e.g. `clients.view`.
    #[must_use]
    pub fn storage_value(&self) -> String {
        format!("{}.{}", self.module.as_str(), self.action.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (module, action) = value.split_once('.').ok_or_else(|| {
            AppError::Validation(format!(
                "permission '{value}' must use the '<module>.<action>' form"
            ))
        })?;

        Ok(Self {
            module: Module::from_str(module)?,
            action: Action::from_str(action)?,
        })
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}.{}",
            self.module.as_str(),
            self.action.as_str()
        )
    }
}

/// Which slice of tenant data a role's dashboard aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardScope {
    /// Tenant-wide figures.
    Global,
    /// Figures for the user's team.
    Team,
    /// Figures for the user's own portfolio only.
    Personal,
}

impl DashboardScope {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Team => "team",
            Self::Personal => "personal",
        }
    }

    /// Parses a storage string into a dashboard scope.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "global" => Ok(Self::Global),
            "team" => Ok(Self::Team),
            "personal" => Ok(Self::Personal),
            _ => Err(AppError::Validation(format!(
                "unknown dashboard scope '{value}'"
            ))),
        }
    }
}

/// Which commission data a role may see.
///
/// Stored as three independent flags; broader visibility always includes
/// the narrower ones in practice, but the flags are persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionVisibility {
    sees_own: bool,
    sees_team: bool,
    sees_all: bool,
}

impl CommissionVisibility {
    /// Creates a visibility setting from its three flags.
    #[must_use]
    pub fn new(sees_own: bool, sees_team: bool, sees_all: bool) -> Self {
        Self {
            sees_own,
            sees_team,
            sees_all,
        }
    }

    /// Returns whether the role sees the user's own commissions.
    #[must_use]
    pub fn sees_own(&self) -> bool {
        self.sees_own
    }

    /// Returns whether the role sees team commissions.
    #[must_use]
    pub fn sees_team(&self) -> bool {
        self.sees_team
    }

    /// Returns whether the role sees all tenant commissions.
    #[must_use]
    pub fn sees_all(&self) -> bool {
        self.sees_all
    }
}

/// Stable audit actions emitted by the provisioning workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a tenant's default roles are materialized.
    RolesBootstrapped,
    /// Emitted when a new user identity is created.
    IdentityCreated,
    /// Emitted when a user is linked to a tenant.
    MembershipLinked,
    /// Emitted when the organization admin role is granted.
    AdminRoleAssigned,
    /// Emitted when a credential handoff email is dispatched.
    CredentialHandoffSent,
    /// Emitted when credential handoff delivery fails.
    CredentialHandoffFailed,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RolesBootstrapped => "provisioning.roles.bootstrapped",
            Self::IdentityCreated => "provisioning.identity.created",
            Self::MembershipLinked => "provisioning.membership.linked",
            Self::AdminRoleAssigned => "provisioning.admin_role.assigned",
            Self::CredentialHandoffSent => "provisioning.handoff.sent",
            Self::CredentialHandoffFailed => "provisioning.handoff.failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Action, DashboardScope, Module, Permission};

    #[test]
    fn permission_roundtrips_storage_value() {
        let permission = Permission::new(Module::Policies, Action::Edit);
        let restored = Permission::from_str(&permission.storage_value());
        assert!(restored.is_ok());
        assert_eq!(
            restored.unwrap_or(Permission::new(Module::Clients, Action::View)),
            permission
        );
    }

    #[test]
    fn permission_storage_value_is_dotted() {
        let permission = Permission::new(Module::Clients, Action::View);
        assert_eq!(permission.storage_value(), "clients.view");
    }

    #[test]
    fn unknown_permission_action_is_rejected() {
        assert!(Permission::from_str("clients.approve").is_err());
    }

    #[test]
    fn permission_without_dot_is_rejected() {
        assert!(Permission::from_str("clientsview").is_err());
    }

    #[test]
    fn dashboard_scope_roundtrips_storage_value() {
        let parsed = DashboardScope::parse(DashboardScope::Team.as_str());
        assert!(parsed.is_ok());
        assert_eq!(
            parsed.unwrap_or(DashboardScope::Global),
            DashboardScope::Team
        );
    }

    #[test]
    fn every_module_storage_value_parses_back() {
        for module in Module::all() {
            assert!(Module::from_str(module.as_str()).is_ok());
        }
    }
}
