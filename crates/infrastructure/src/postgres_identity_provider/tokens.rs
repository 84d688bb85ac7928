use super::*;

impl PostgresIdentityProvider {
    /// Stores a setup token hash, retiring any live token for the same
    /// email so at most one link works at a time.
    pub(super) async fn store_credential_setup_token_impl(
        &self,
        email: &str,
        token_hash: &str,
        redirect_url: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<()> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Store(format!("failed to begin token transaction: {error}"))
        })?;

        sqlx::query(
            r#"
            UPDATE credential_setup_tokens
            SET used_at = now()
            WHERE email = LOWER($1) AND used_at IS NULL
            "#,
        )
        .bind(email)
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Store(format!("failed to retire setup tokens: {error}")))?;

        sqlx::query(
            r#"
            INSERT INTO credential_setup_tokens (email, token_hash, redirect_url, expires_at)
            VALUES (LOWER($1), $2, $3, $4)
            "#,
        )
        .bind(email)
        .bind(token_hash)
        .bind(redirect_url)
        .bind(expires_at)
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Store(format!("failed to store setup token: {error}")))?;

        transaction.commit().await.map_err(|error| {
            AppError::Store(format!("failed to commit token transaction: {error}"))
        })?;

        Ok(())
    }
}
