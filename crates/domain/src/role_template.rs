//! Built-in role template catalog.
//!
//! Templates are pure in-process data. The bootstrap workflow materializes
//! them into tenant-scoped roles; nothing here touches storage.

use std::collections::HashSet;

use maklaro_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::security::{Action, CommissionVisibility, DashboardScope, Module, Permission};

/// Version of the built-in catalog, bumped whenever its templates change.
const BUILTIN_CATALOG_VERSION: u32 = 1;

/// A default role definition, not yet tied to any tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTemplate {
    name: NonEmptyString,
    description: NonEmptyString,
    dashboard_scope: DashboardScope,
    commission_visibility: CommissionVisibility,
    grants: Vec<Permission>,
    is_org_admin: bool,
}

impl RoleTemplate {
    /// Creates a validated role template.
    ///
    /// Every template must carry at least one grant; a role with no
    /// permissions is useless and would make bootstrap completion
    /// undetectable for that role.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        dashboard_scope: DashboardScope,
        commission_visibility: CommissionVisibility,
        grants: Vec<Permission>,
        is_org_admin: bool,
    ) -> AppResult<Self> {
        let name = NonEmptyString::new(name)?;

        if grants.is_empty() {
            return Err(AppError::Validation(format!(
                "role template '{}' must carry at least one permission grant",
                name.as_str()
            )));
        }

        let mut seen_grants = HashSet::new();
        for grant in &grants {
            if !seen_grants.insert(*grant) {
                return Err(AppError::Validation(format!(
                    "role template '{}' repeats grant '{}'",
                    name.as_str(),
                    grant.storage_value()
                )));
            }
        }

        Ok(Self {
            name,
            description: NonEmptyString::new(description)?,
            dashboard_scope,
            commission_visibility,
            grants,
            is_org_admin,
        })
    }

    /// Returns the template name, unique within the catalog.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the human description.
    #[must_use]
    pub fn description(&self) -> &NonEmptyString {
        &self.description
    }

    /// Returns the dashboard scope materialized onto the tenant role.
    #[must_use]
    pub fn dashboard_scope(&self) -> DashboardScope {
        self.dashboard_scope
    }

    /// Returns the commission visibility flags.
    #[must_use]
    pub fn commission_visibility(&self) -> CommissionVisibility {
        self.commission_visibility
    }

    /// Returns the ordered permission grants.
    #[must_use]
    pub fn grants(&self) -> &[Permission] {
        &self.grants
    }

    /// Returns whether this is the organization admin template.
    #[must_use]
    pub fn is_org_admin(&self) -> bool {
        self.is_org_admin
    }
}

/// Ordered, versioned catalog of default role templates.
///
/// Construction validates the whole catalog up front so a misconfigured
/// catalog fails process startup instead of surfacing per request.
#[derive(Debug, Clone)]
pub struct RoleTemplateRegistry {
    version: u32,
    templates: Vec<RoleTemplate>,
    admin_index: usize,
}

impl RoleTemplateRegistry {
    /// Creates a registry from an ordered template list.
    ///
    /// Fails with [`AppError::Configuration`] when the catalog is empty,
    /// repeats a template name, or does not mark exactly one organization
    /// admin template.
    pub fn new(version: u32, templates: Vec<RoleTemplate>) -> AppResult<Self> {
        if templates.is_empty() {
            return Err(AppError::Configuration(
                "role template catalog must not be empty".to_owned(),
            ));
        }

        let mut seen_names = HashSet::new();
        for template in &templates {
            if !seen_names.insert(template.name().as_str().to_lowercase()) {
                return Err(AppError::Configuration(format!(
                    "role template catalog repeats name '{}'",
                    template.name().as_str()
                )));
            }
        }

        let admin_indexes: Vec<usize> = templates
            .iter()
            .enumerate()
            .filter(|(_, template)| template.is_org_admin())
            .map(|(index, _)| index)
            .collect();

        if admin_indexes.len() != 1 {
            return Err(AppError::Configuration(format!(
                "role template catalog must mark exactly one organization admin template, found {}",
                admin_indexes.len()
            )));
        }

        Ok(Self {
            version,
            templates,
            admin_index: admin_indexes[0],
        })
    }

    /// Builds the built-in brokerage catalog.
    pub fn builtin() -> AppResult<Self> {
        Self::new(BUILTIN_CATALOG_VERSION, builtin_templates()?)
    }

    /// Returns the catalog version.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns the templates in catalog order.
    #[must_use]
    pub fn templates(&self) -> &[RoleTemplate] {
        &self.templates
    }

    /// Returns the organization admin template.
    #[must_use]
    pub fn admin_template(&self) -> &RoleTemplate {
        // Index validated in `new`.
        &self.templates[self.admin_index]
    }
}

/// Builds the four built-in brokerage roles.
fn builtin_templates() -> AppResult<Vec<RoleTemplate>> {
    let mut admin_grants = Vec::new();
    for module in Module::all() {
        for action in Action::all() {
            admin_grants.push(Permission::new(*module, *action));
        }
    }

    Ok(vec![
        RoleTemplate::new(
            "Org Admin",
            "Full administrative access to every module of the organization.",
            DashboardScope::Global,
            CommissionVisibility::new(true, true, true),
            admin_grants,
            true,
        )?,
        RoleTemplate::new(
            "Manager",
            "Leads a team: manages clients, policies and campaigns and sees team commissions.",
            DashboardScope::Team,
            CommissionVisibility::new(true, true, false),
            module_grants(&[
                (Module::Clients, &[Action::View, Action::Create, Action::Edit]),
                (Module::Policies, &[Action::View, Action::Create, Action::Edit]),
                (Module::Commissions, &[Action::View]),
                (Module::Campaigns, &[Action::View, Action::Create, Action::Edit]),
                (Module::Documents, &[Action::View, Action::Create, Action::Edit]),
                (Module::Reports, &[Action::View]),
                (Module::Users, &[Action::View]),
            ]),
            false,
        )?,
        RoleTemplate::new(
            "Agent",
            "Works an own portfolio of clients and policies.",
            DashboardScope::Personal,
            CommissionVisibility::new(true, false, false),
            module_grants(&[
                (Module::Clients, &[Action::View, Action::Create, Action::Edit]),
                (Module::Policies, &[Action::View, Action::Create]),
                (Module::Commissions, &[Action::View]),
                (Module::Campaigns, &[Action::View]),
                (Module::Documents, &[Action::View, Action::Create]),
                (Module::Reports, &[Action::View]),
            ]),
            false,
        )?,
        RoleTemplate::new(
            "Back-office",
            "Processes policies, commissions and documents across the whole tenant.",
            DashboardScope::Global,
            CommissionVisibility::new(true, true, true),
            module_grants(&[
                (Module::Clients, &[Action::View, Action::Edit]),
                (Module::Policies, &[Action::View, Action::Create, Action::Edit]),
                (Module::Commissions, &[Action::View, Action::Create, Action::Edit]),
                (Module::Campaigns, &[Action::View]),
                (Module::Documents, &[Action::View, Action::Create, Action::Edit]),
                (Module::Reports, &[Action::View]),
            ]),
            false,
        )?,
    ])
}

/// Expands per-module action lists into a flat grant list.
fn module_grants(entries: &[(Module, &[Action])]) -> Vec<Permission> {
    let mut grants = Vec::new();
    for (module, actions) in entries {
        for action in *actions {
            grants.push(Permission::new(*module, *action));
        }
    }

    grants
}

#[cfg(test)]
mod tests {
    use maklaro_core::AppError;

    use super::{RoleTemplate, RoleTemplateRegistry};
    use crate::security::{Action, CommissionVisibility, DashboardScope, Module, Permission};

    fn template(name: &str, is_org_admin: bool) -> RoleTemplate {
        RoleTemplate::new(
            name,
            "Test role",
            DashboardScope::Global,
            CommissionVisibility::new(true, false, false),
            vec![Permission::new(Module::Clients, Action::View)],
            is_org_admin,
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn builtin_catalog_constructs() {
        assert!(RoleTemplateRegistry::builtin().is_ok());
    }

    #[test]
    fn builtin_catalog_marks_exactly_one_admin() {
        let registry = RoleTemplateRegistry::builtin().unwrap_or_else(|_| unreachable!());
        let admin_count = registry
            .templates()
            .iter()
            .filter(|template| template.is_org_admin())
            .count();

        assert_eq!(admin_count, 1);
        assert_eq!(registry.admin_template().name().as_str(), "Org Admin");
    }

    #[test]
    fn builtin_admin_template_grants_every_module_action() {
        let registry = RoleTemplateRegistry::builtin().unwrap_or_else(|_| unreachable!());
        let admin = registry.admin_template();

        assert_eq!(
            admin.grants().len(),
            Module::all().len() * Action::all().len()
        );
        assert!(
            admin
                .grants()
                .contains(&Permission::new(Module::Settings, Action::Delete))
        );
    }

    #[test]
    fn builtin_template_order_is_stable() {
        let registry = RoleTemplateRegistry::builtin().unwrap_or_else(|_| unreachable!());
        let names: Vec<&str> = registry
            .templates()
            .iter()
            .map(|template| template.name().as_str())
            .collect();

        assert_eq!(names, vec!["Org Admin", "Manager", "Agent", "Back-office"]);
    }

    #[test]
    fn every_builtin_template_carries_grants() {
        let registry = RoleTemplateRegistry::builtin().unwrap_or_else(|_| unreachable!());
        for template in registry.templates() {
            assert!(!template.grants().is_empty());
        }
    }

    #[test]
    fn registry_rejects_missing_admin_marker() {
        let result = RoleTemplateRegistry::new(1, vec![template("Agent", false)]);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn registry_rejects_duplicate_admin_markers() {
        let result = RoleTemplateRegistry::new(
            1,
            vec![template("Org Admin", true), template("Owner", true)],
        );
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn registry_rejects_duplicate_template_names() {
        let result = RoleTemplateRegistry::new(
            1,
            vec![template("Org Admin", true), template("org admin", false)],
        );
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn template_requires_at_least_one_grant() {
        let result = RoleTemplate::new(
            "Empty",
            "No grants",
            DashboardScope::Global,
            CommissionVisibility::new(true, false, false),
            Vec::new(),
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn template_rejects_duplicate_grants() {
        let grant = Permission::new(Module::Clients, Action::View);
        let result = RoleTemplate::new(
            "Duplicated",
            "Repeats a grant",
            DashboardScope::Global,
            CommissionVisibility::new(true, false, false),
            vec![grant, grant],
            false,
        );
        assert!(result.is_err());
    }
}
