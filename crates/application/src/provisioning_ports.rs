//! Ports consumed by the tenant provisioning workflow.
//!
//! Records cross these boundaries as plain data; every uniqueness rule they
//! rely on is enforced by the backing store, not by callers.

mod audit;
mod identities;
mod repositories;
mod roles;

pub use audit::AuditEvent;
pub use identities::{NewIdentity, UserIdentity};
pub use repositories::{
    AuditRepository, IdentityProvider, MembershipStore, RoleStore, TenantDirectory,
};
pub use roles::{RoleSeed, TenantRole};
