use super::*;

impl PostgresIdentityProvider {
    pub(super) async fn find_identity_by_email_impl(
        &self,
        email: &str,
    ) -> AppResult<Option<UserIdentity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, email, first_name, last_name, phone, language, account_tier, confirmed_at
            FROM user_identities
            WHERE email = LOWER($1)
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to find identity by email: {error}")))?;

        row.map(UserIdentity::try_from).transpose()
    }
}
