//! PostgreSQL-backed tenant directory.

use async_trait::async_trait;
use sqlx::PgPool;

use maklaro_application::TenantDirectory;
use maklaro_core::{AppError, AppResult, TenantId};
use maklaro_domain::{Tenant, TenantSlug};

/// PostgreSQL implementation of the tenant directory port.
#[derive(Clone)]
pub struct PostgresTenantDirectory {
    pool: PgPool,
}

impl PostgresTenantDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TenantRow {
    id: uuid::Uuid,
    name: String,
    slug: String,
}

impl TryFrom<TenantRow> for Tenant {
    type Error = AppError;

    fn try_from(row: TenantRow) -> Result<Self, Self::Error> {
        let slug = TenantSlug::new(row.slug)?;
        Tenant::new(TenantId::from_uuid(row.id), row.name, slug)
    }
}

#[async_trait]
impl TenantDirectory for PostgresTenantDirectory {
    async fn find_tenant(&self, tenant_id: TenantId) -> AppResult<Option<Tenant>> {
        let row = sqlx::query_as::<_, TenantRow>(
            r#"
            SELECT id, name, slug
            FROM tenants
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to find tenant: {error}")))?;

        row.map(Tenant::try_from).transpose()
    }
}
