//! Application services and ports.

#![forbid(unsafe_code)]

mod provisioning_ports;
mod provisioning_service;

pub use provisioning_ports::{
    AuditEvent, AuditRepository, IdentityProvider, MembershipStore, NewIdentity, RoleSeed,
    RoleStore, TenantDirectory, TenantRole, UserIdentity,
};
pub use provisioning_service::{
    CredentialHandoffOutcome, CredentialHandoffService, EmailService, IdentityService,
    ProvisionTenantAdminInput, ProvisioningOutcome, ProvisioningReport, ResolvedIdentity,
    RoleBootstrapOutcome, RoleBootstrapService, SecretHasher, TenantProvisioningService,
};
