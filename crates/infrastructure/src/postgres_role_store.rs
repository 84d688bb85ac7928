//! PostgreSQL-backed role store.

use async_trait::async_trait;
use sqlx::PgPool;

use maklaro_application::{RoleSeed, RoleStore, TenantRole};
use maklaro_core::{AppError, AppResult, TenantId};
use maklaro_domain::{CommissionVisibility, DashboardScope, Permission, RoleId};

#[cfg(test)]
mod tests;

/// PostgreSQL implementation of the role store port.
#[derive(Clone)]
pub struct PostgresRoleStore {
    pool: PgPool,
}

impl PostgresRoleStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: uuid::Uuid,
    tenant_id: uuid::Uuid,
    name: String,
    description: String,
    is_system: bool,
    dashboard_scope: String,
    sees_own_commissions: bool,
    sees_team_commissions: bool,
    sees_all_commissions: bool,
}

impl TryFrom<RoleRow> for TenantRole {
    type Error = AppError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RoleId::from_uuid(row.id),
            tenant_id: TenantId::from_uuid(row.tenant_id),
            name: row.name,
            description: row.description,
            is_system: row.is_system,
            dashboard_scope: DashboardScope::parse(row.dashboard_scope.as_str())?,
            commission_visibility: CommissionVisibility::new(
                row.sees_own_commissions,
                row.sees_team_commissions,
                row.sees_all_commissions,
            ),
        })
    }
}

#[async_trait]
impl RoleStore for PostgresRoleStore {
    async fn count_roles(&self, tenant_id: TenantId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM tenant_roles
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to count tenant roles: {error}")))
    }

    async fn find_role_by_name(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> AppResult<Option<TenantRole>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, tenant_id, name, description, is_system, dashboard_scope,
                   sees_own_commissions, sees_team_commissions, sees_all_commissions
            FROM tenant_roles
            WHERE tenant_id = $1 AND name = $2
            LIMIT 1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to find role by name: {error}")))?;

        row.map(TenantRole::try_from).transpose()
    }

    async fn upsert_role(&self, tenant_id: TenantId, seed: &RoleSeed) -> AppResult<TenantRole> {
        // The touch update makes a colliding insert return the stored row
        // in the same round trip.
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO tenant_roles (
                tenant_id, name, description, is_system, dashboard_scope,
                sees_own_commissions, sees_team_commissions, sees_all_commissions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (tenant_id, name) DO UPDATE SET updated_at = now()
            RETURNING id, tenant_id, name, description, is_system, dashboard_scope,
                      sees_own_commissions, sees_team_commissions, sees_all_commissions
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(seed.name.as_str())
        .bind(seed.description.as_str())
        .bind(seed.is_system)
        .bind(seed.dashboard_scope.as_str())
        .bind(seed.commission_visibility.sees_own())
        .bind(seed.commission_visibility.sees_team())
        .bind(seed.commission_visibility.sees_all())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to upsert tenant role: {error}")))?;

        TenantRole::try_from(row)
    }

    async fn insert_role_permissions(
        &self,
        role_id: RoleId,
        grants: &[Permission],
    ) -> AppResult<()> {
        let values: Vec<String> = grants.iter().map(Permission::storage_value).collect();

        sqlx::query(
            r#"
            INSERT INTO tenant_role_permissions (role_id, permission)
            SELECT $1, permission
            FROM UNNEST($2::text[]) AS permission
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id.as_uuid())
        .bind(values)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to insert role permissions: {error}")))?;

        Ok(())
    }

    async fn list_roles_missing_permissions(&self, tenant_id: TenantId) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.name
            FROM tenant_roles r
            LEFT JOIN tenant_role_permissions p ON p.role_id = r.id
            WHERE r.tenant_id = $1 AND r.is_system AND p.role_id IS NULL
            ORDER BY r.name
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Store(format!("failed to list roles missing permissions: {error}"))
        })
    }
}
