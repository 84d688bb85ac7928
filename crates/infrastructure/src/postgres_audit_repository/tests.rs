use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use maklaro_application::{AuditEvent, AuditRepository};
use maklaro_core::TenantId;
use maklaro_domain::AuditAction;

use super::PostgresAuditRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres audit tests: {error}");
    }

    Some(pool)
}

#[tokio::test]
async fn append_event_persists_every_column() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresAuditRepository::new(pool.clone());
    let tenant_id = TenantId::new();
    let resource_id = uuid::Uuid::new_v4().to_string();

    let appended = repository
        .append_event(AuditEvent {
            tenant_id,
            actor: "platform-owner".to_owned(),
            action: AuditAction::IdentityCreated,
            resource_type: "user".to_owned(),
            resource_id: resource_id.clone(),
            detail: Some("admin@example.test".to_owned()),
        })
        .await;
    assert!(appended.is_ok());

    let row = sqlx::query_as::<_, (String, String, String, Option<String>)>(
        r#"
            SELECT actor, action, resource_id, detail
            FROM audit_events
            WHERE tenant_id = $1
            "#,
    )
    .bind(tenant_id.as_uuid())
    .fetch_one(&pool)
    .await;

    let (actor, action, stored_resource_id, detail) = row.unwrap_or_else(|_| panic!("test"));
    assert_eq!(actor, "platform-owner");
    assert_eq!(action, AuditAction::IdentityCreated.as_str());
    assert_eq!(stored_resource_id, resource_id);
    assert_eq!(detail, Some("admin@example.test".to_owned()));
}

#[tokio::test]
async fn append_event_accepts_missing_detail() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresAuditRepository::new(pool.clone());
    let tenant_id = TenantId::new();

    let appended = repository
        .append_event(AuditEvent {
            tenant_id,
            actor: "platform-owner".to_owned(),
            action: AuditAction::RolesBootstrapped,
            resource_type: "tenant".to_owned(),
            resource_id: tenant_id.as_uuid().to_string(),
            detail: None,
        })
        .await;
    assert!(appended.is_ok());

    let detail = sqlx::query_scalar::<_, Option<String>>(
        r#"
            SELECT detail
            FROM audit_events
            WHERE tenant_id = $1
            "#,
    )
    .bind(tenant_id.as_uuid())
    .fetch_one(&pool)
    .await;

    assert_eq!(detail.unwrap_or_else(|_| panic!("test")), None);
}
