//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod role_template;
mod security;
mod tenant;
mod user;

pub use role_template::{RoleTemplate, RoleTemplateRegistry};
pub use security::{
    Action, AuditAction, CommissionVisibility, DashboardScope, Module, Permission, RoleId,
};
pub use tenant::{Tenant, TenantSlug};
pub use user::{AccountTier, EmailAddress, UserId, UserProfile};
