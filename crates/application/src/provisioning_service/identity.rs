use std::sync::Arc;

use maklaro_core::{AppError, AppResult};
use maklaro_domain::{AccountTier, EmailAddress, UserProfile};

use super::token_crypto::generate_throwaway_secret;
use crate::provisioning_ports::{IdentityProvider, NewIdentity, UserIdentity};

/// Port for hashing generated credentials. Keeps the application layer free
/// of direct cryptographic library coupling.
pub trait SecretHasher: Send + Sync {
    /// Hashes a secret using Argon2id.
    fn hash_secret(&self, secret: &str) -> AppResult<String>;
}

/// Identity resolved by the provisioning workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// The resolved or freshly created identity.
    pub identity: UserIdentity,
    /// Whether this call created the identity.
    pub is_new: bool,
}

/// Resolves the global identity behind an email address, creating one when
/// none exists.
#[derive(Clone)]
pub struct IdentityService {
    identities: Arc<dyn IdentityProvider>,
    secret_hasher: Arc<dyn SecretHasher>,
}

impl IdentityService {
    /// Creates a new identity service.
    #[must_use]
    pub fn new(
        identities: Arc<dyn IdentityProvider>,
        secret_hasher: Arc<dyn SecretHasher>,
    ) -> Self {
        Self {
            identities,
            secret_hasher,
        }
    }

    /// Resolves the identity owning `email`, creating it when absent.
    ///
    /// New identities start pre-confirmed at staff tier with a hashed
    /// throwaway secret. Reused identities get blank profile fields filled
    /// from the supplied profile and are raised to staff tier if they were
    /// client-tier; an administrator invite implies staff access.
    pub async fn resolve_or_create(
        &self,
        email: &EmailAddress,
        profile: &UserProfile,
        language: &str,
    ) -> AppResult<ResolvedIdentity> {
        if let Some(existing) = self
            .identities
            .find_identity_by_email(email.as_str())
            .await?
        {
            return self.reuse_identity(existing, profile).await;
        }

        let throwaway_secret = generate_throwaway_secret()?;
        let secret_hash = self.secret_hasher.hash_secret(&throwaway_secret)?;

        let new_identity = NewIdentity {
            email: email.as_str().to_owned(),
            secret_hash,
            profile: profile.clone(),
            language: language.to_owned(),
            account_tier: AccountTier::Staff,
            confirmed: true,
        };

        match self.identities.insert_identity(&new_identity).await? {
            Some(created) => Ok(ResolvedIdentity {
                identity: created,
                is_new: true,
            }),
            None => {
                // Lost a concurrent create for the same email; the stored
                // row wins and this call proceeds with it.
                let existing = self
                    .identities
                    .find_identity_by_email(email.as_str())
                    .await?
                    .ok_or_else(|| {
                        AppError::Store(format!(
                            "identity for '{}' vanished after an insert conflict",
                            email.as_str()
                        ))
                    })?;

                self.reuse_identity(existing, profile).await
            }
        }
    }

    async fn reuse_identity(
        &self,
        mut identity: UserIdentity,
        supplied: &UserProfile,
    ) -> AppResult<ResolvedIdentity> {
        if let Some(merged) = identity.profile.merge_missing(supplied) {
            self.identities
                .update_profile(identity.id, &merged)
                .await?;
            identity.profile = merged;
        }

        if identity.account_tier == AccountTier::Client {
            self.identities.promote_to_staff(identity.id).await?;
            identity.account_tier = AccountTier::Staff;
        }

        Ok(ResolvedIdentity {
            identity,
            is_new: false,
        })
    }
}
