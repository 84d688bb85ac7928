//! Append-only audit trail adapter.

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use sqlx::PgPool;

use maklaro_application::{AuditEvent, AuditRepository};
use maklaro_core::{AppError, AppResult};

/// Writes provisioning audit events to the `audit_events` table.
///
/// Rows are insert-only from this crate; `created_at` is assigned by the
/// database clock. Reads happen through reporting tooling outside the API.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates an audit repository backed by the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let AuditEvent {
            tenant_id,
            actor,
            action,
            resource_type,
            resource_id,
            detail,
        } = event;

        sqlx::query(
            r#"
            INSERT INTO audit_events
                (tenant_id, actor, action, resource_type, resource_id, detail)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(actor)
        .bind(action.as_str())
        .bind(resource_type)
        .bind(resource_id)
        .bind(detail)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to insert audit event: {error}")))?;

        Ok(())
    }
}
