//! Tenant-admin provisioning services.
//!
//! The orchestrator sequences role bootstrap, identity resolution,
//! membership binding, role assignment and credential handoff. Every write
//! along the way is an idempotent upsert, so the whole workflow is safe to
//! retry with identical inputs.

mod handoff;
mod identity;
mod orchestrator;
mod role_bootstrap;
mod token_crypto;


pub use handoff::{CredentialHandoffOutcome, CredentialHandoffService, EmailService};
pub use identity::{IdentityService, ResolvedIdentity, SecretHasher};
pub use orchestrator::{
    ProvisionTenantAdminInput, ProvisioningOutcome, ProvisioningReport, TenantProvisioningService,
};
pub use role_bootstrap::{RoleBootstrapOutcome, RoleBootstrapService};
