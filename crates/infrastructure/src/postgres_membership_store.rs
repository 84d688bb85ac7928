//! PostgreSQL-backed membership store.

use async_trait::async_trait;
use sqlx::PgPool;

use maklaro_application::MembershipStore;
use maklaro_core::{AppError, AppResult, TenantId};
use maklaro_domain::{RoleId, UserId};

#[cfg(test)]
mod tests;

/// PostgreSQL implementation of the membership store port.
#[derive(Clone)]
pub struct PostgresMembershipStore {
    pool: PgPool,
}

impl PostgresMembershipStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipStore for PostgresMembershipStore {
    async fn ensure_membership(&self, tenant_id: TenantId, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO tenant_memberships (tenant_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (tenant_id, user_id) DO NOTHING
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to ensure membership: {error}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn role_assignment_exists(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: RoleId,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM tenant_role_assignments
                WHERE tenant_id = $1 AND user_id = $2 AND role_id = $3
            )
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(role_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to check role assignment: {error}")))
    }

    async fn ensure_role_assignment(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        role_id: RoleId,
        assigned_by: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO tenant_role_assignments (tenant_id, user_id, role_id, assigned_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (tenant_id, user_id, role_id) DO NOTHING
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(role_id.as_uuid())
        .bind(assigned_by)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to ensure role assignment: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
