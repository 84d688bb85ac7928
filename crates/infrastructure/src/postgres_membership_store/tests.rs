use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use maklaro_application::MembershipStore;
use maklaro_core::TenantId;
use maklaro_domain::{RoleId, UserId};

use super::PostgresMembershipStore;

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
        panic!("failed to run migrations for postgres membership tests: {error}");
    }

    Some(pool)
}

async fn seed_tenant(pool: &PgPool) -> TenantId {
    let tenant_id = TenantId::new();
    let slug = format!("t-{}", tenant_id.as_uuid().simple());
    let insert = sqlx::query(
        r#"
            INSERT INTO tenants (id, name, slug)
            VALUES ($1, $2, $3)
            "#,
    )
    .bind(tenant_id.as_uuid())
    .bind("Membership Tenant")
    .bind(slug)
    .execute(pool)
    .await;
    assert!(insert.is_ok());

    tenant_id
}

async fn seed_identity(pool: &PgPool) -> UserId {
    let email = format!("member-{}@test.example", uuid::Uuid::new_v4().simple());
    let id = sqlx::query_scalar::<_, uuid::Uuid>(
        r#"
            INSERT INTO user_identities (email, password_hash)
            VALUES ($1, 'placeholder-hash')
            RETURNING id
            "#,
    )
    .bind(email)
    .fetch_one(pool)
    .await;

    UserId::from_uuid(id.unwrap_or_else(|_| panic!("test")))
}

async fn seed_role(pool: &PgPool, tenant_id: TenantId) -> RoleId {
    let id = sqlx::query_scalar::<_, uuid::Uuid>(
        r#"
            INSERT INTO tenant_roles (tenant_id, name, is_system, dashboard_scope)
            VALUES ($1, 'Org Admin', TRUE, 'global')
            RETURNING id
            "#,
    )
    .bind(tenant_id.as_uuid())
    .fetch_one(pool)
    .await;

    RoleId::from_uuid(id.unwrap_or_else(|_| panic!("test")))
}

#[tokio::test]
async fn membership_upsert_reports_only_the_first_insert() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = PostgresMembershipStore::new(pool.clone());
    let tenant_id = seed_tenant(&pool).await;
    let user_id = seed_identity(&pool).await;

    let first = store.ensure_membership(tenant_id, user_id).await;
    assert!(first.is_ok());
    assert!(first.unwrap_or(false));

    let second = store.ensure_membership(tenant_id, user_id).await;
    assert!(second.is_ok());
    assert!(!second.unwrap_or(true));
}

#[tokio::test]
async fn role_assignment_upsert_and_existence_check_agree() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = PostgresMembershipStore::new(pool.clone());
    let tenant_id = seed_tenant(&pool).await;
    let user_id = seed_identity(&pool).await;
    let role_id = seed_role(&pool, tenant_id).await;

    let before = store
        .role_assignment_exists(tenant_id, user_id, role_id)
        .await;
    assert!(before.is_ok());
    assert!(!before.unwrap_or(true));

    let assigned = store
        .ensure_role_assignment(tenant_id, user_id, role_id, "platform-owner")
        .await;
    assert!(assigned.is_ok());
    assert!(assigned.unwrap_or(false));

    let after = store
        .role_assignment_exists(tenant_id, user_id, role_id)
        .await;
    assert!(after.is_ok());
    assert!(after.unwrap_or(false));

    let replay = store
        .ensure_role_assignment(tenant_id, user_id, role_id, "platform-owner")
        .await;
    assert!(replay.is_ok());
    assert!(!replay.unwrap_or(true));

    let assigned_by = sqlx::query_scalar::<_, String>(
        r#"
            SELECT assigned_by
            FROM tenant_role_assignments
            WHERE tenant_id = $1 AND user_id = $2 AND role_id = $3
            "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(user_id.as_uuid())
    .bind(role_id.as_uuid())
    .fetch_one(&pool)
    .await;
    assert_eq!(
        assigned_by.unwrap_or_default(),
        "platform-owner".to_owned()
    );
}
