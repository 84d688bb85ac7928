//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_secret_hasher;
mod console_email_service;
mod postgres_audit_repository;
mod postgres_identity_provider;
mod postgres_membership_store;
mod postgres_role_store;
mod postgres_tenant_directory;
mod smtp_email_service;

pub use argon2_secret_hasher::Argon2SecretHasher;
pub use console_email_service::ConsoleEmailService;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_identity_provider::PostgresIdentityProvider;
pub use postgres_membership_store::PostgresMembershipStore;
pub use postgres_role_store::PostgresRoleStore;
pub use postgres_tenant_directory::PostgresTenantDirectory;
pub use smtp_email_service::{SmtpEmailConfig, SmtpEmailService};
