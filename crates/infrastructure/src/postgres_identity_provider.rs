//! PostgreSQL-backed identity provider.

use async_trait::async_trait;
use sqlx::PgPool;

use maklaro_application::{IdentityProvider, NewIdentity, UserIdentity};
use maklaro_core::{AppError, AppResult};
use maklaro_domain::{AccountTier, UserId, UserProfile};

/// PostgreSQL implementation of the identity provider port.
#[derive(Clone)]
pub struct PostgresIdentityProvider {
    pool: PgPool,
}

impl PostgresIdentityProvider {
    /// Creates a provider with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct IdentityRow {
    id: uuid::Uuid,
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    language: String,
    account_tier: String,
    confirmed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<IdentityRow> for UserIdentity {
    type Error = AppError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            profile: UserProfile::from_parts(row.first_name, row.last_name, row.phone),
            language: row.language,
            account_tier: AccountTier::parse(row.account_tier.as_str())?,
            confirmed: row.confirmed_at.is_some(),
        })
    }
}

mod account;
mod lookup;
mod tokens;

#[cfg(test)]
mod tests;

#[async_trait]
impl IdentityProvider for PostgresIdentityProvider {
    async fn find_identity_by_email(&self, email: &str) -> AppResult<Option<UserIdentity>> {
        self.find_identity_by_email_impl(email).await
    }

    async fn insert_identity(&self, identity: &NewIdentity) -> AppResult<Option<UserIdentity>> {
        self.insert_identity_impl(identity).await
    }

    async fn update_profile(&self, user_id: UserId, profile: &UserProfile) -> AppResult<()> {
        self.update_profile_impl(user_id, profile).await
    }

    async fn promote_to_staff(&self, user_id: UserId) -> AppResult<()> {
        self.promote_to_staff_impl(user_id).await
    }

    async fn store_credential_setup_token(
        &self,
        email: &str,
        token_hash: &str,
        redirect_url: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<()> {
        self.store_credential_setup_token_impl(email, token_hash, redirect_url, expires_at)
            .await
    }
}
