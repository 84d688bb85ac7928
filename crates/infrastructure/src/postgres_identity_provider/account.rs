use super::*;

impl PostgresIdentityProvider {
    pub(super) async fn insert_identity_impl(
        &self,
        identity: &NewIdentity,
    ) -> AppResult<Option<UserIdentity>> {
        // ON CONFLICT DO NOTHING returns no row when the email is taken, so
        // a lost race maps straight onto the port's `None` contract.
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO user_identities (
                email, password_hash, first_name, last_name, phone, language,
                account_tier, confirmed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $8 THEN now() END)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, first_name, last_name, phone, language, account_tier, confirmed_at
            "#,
        )
        .bind(identity.email.as_str())
        .bind(identity.secret_hash.as_str())
        .bind(identity.profile.first_name())
        .bind(identity.profile.last_name())
        .bind(identity.profile.phone())
        .bind(identity.language.as_str())
        .bind(identity.account_tier.as_str())
        .bind(identity.confirmed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to insert identity: {error}")))?;

        row.map(UserIdentity::try_from).transpose()
    }

    pub(super) async fn update_profile_impl(
        &self,
        user_id: UserId,
        profile: &UserProfile,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE user_identities
            SET first_name = $2, last_name = $3, phone = $4, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(profile.first_name())
        .bind(profile.last_name())
        .bind(profile.phone())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to update identity profile: {error}")))?;

        Ok(())
    }

    pub(super) async fn promote_to_staff_impl(&self, user_id: UserId) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE user_identities
            SET account_tier = 'staff', updated_at = now()
            WHERE id = $1 AND account_tier = 'client'
            "#,
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Store(format!("failed to promote identity to staff: {error}"))
        })?;

        Ok(())
    }
}
