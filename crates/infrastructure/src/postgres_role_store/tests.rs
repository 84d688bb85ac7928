use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use maklaro_application::{RoleSeed, RoleStore};
use maklaro_core::TenantId;
use maklaro_domain::{Action, CommissionVisibility, DashboardScope, Module, Permission};

use super::PostgresRoleStore;

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
        panic!("failed to run migrations for postgres role store tests: {error}");
    }

    Some(pool)
}

async fn ensure_tenant(pool: &PgPool, tenant_id: TenantId, name: &str) {
    let slug = format!("t-{}", tenant_id.as_uuid().simple());
    let insert = sqlx::query(
        r#"
            INSERT INTO tenants (id, name, slug)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
    )
    .bind(tenant_id.as_uuid())
    .bind(name)
    .bind(slug)
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

fn admin_seed() -> RoleSeed {
    RoleSeed {
        name: "Org Admin".to_owned(),
        description: "Full administrative access".to_owned(),
        is_system: true,
        dashboard_scope: DashboardScope::Global,
        commission_visibility: CommissionVisibility::new(true, true, true),
    }
}

#[tokio::test]
async fn upsert_role_returns_the_same_row_on_replay() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = PostgresRoleStore::new(pool.clone());
    let tenant_id = TenantId::new();
    ensure_tenant(&pool, tenant_id, "Role Tenant").await;

    let first = store.upsert_role(tenant_id, &admin_seed()).await;
    assert!(first.is_ok());
    let first = first.unwrap_or_else(|_| panic!("test"));
    assert_eq!(first.name, "Org Admin");
    assert_eq!(first.dashboard_scope, DashboardScope::Global);

    let second = store.upsert_role(tenant_id, &admin_seed()).await;
    assert!(second.is_ok());
    assert_eq!(second.unwrap_or_else(|_| panic!("test")).id, first.id);

    let count = store.count_roles(tenant_id).await;
    assert_eq!(count.unwrap_or(0), 1);
}

#[tokio::test]
async fn permissions_attach_once_and_clear_the_missing_list() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = PostgresRoleStore::new(pool.clone());
    let tenant_id = TenantId::new();
    ensure_tenant(&pool, tenant_id, "Permission Tenant").await;

    let role = store.upsert_role(tenant_id, &admin_seed()).await;
    assert!(role.is_ok());
    let role = role.unwrap_or_else(|_| panic!("test"));

    let missing = store.list_roles_missing_permissions(tenant_id).await;
    assert_eq!(missing.unwrap_or_default(), vec!["Org Admin".to_owned()]);

    let grants = vec![
        Permission::new(Module::Clients, Action::View),
        Permission::new(Module::Clients, Action::Edit),
    ];
    let attached = store.insert_role_permissions(role.id, &grants).await;
    assert!(attached.is_ok());

    let replay = store.insert_role_permissions(role.id, &grants).await;
    assert!(replay.is_ok());

    let stored = sqlx::query_scalar::<_, i64>(
        r#"
            SELECT COUNT(*)
            FROM tenant_role_permissions
            WHERE role_id = $1
            "#,
    )
    .bind(role.id.as_uuid())
    .fetch_one(&pool)
    .await;
    assert_eq!(stored.unwrap_or(0), 2);

    let missing = store.list_roles_missing_permissions(tenant_id).await;
    assert!(missing.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn find_role_by_name_is_tenant_scoped() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let store = PostgresRoleStore::new(pool.clone());
    let first_tenant = TenantId::new();
    let second_tenant = TenantId::new();
    ensure_tenant(&pool, first_tenant, "First Tenant").await;
    ensure_tenant(&pool, second_tenant, "Second Tenant").await;

    let created = store.upsert_role(first_tenant, &admin_seed()).await;
    assert!(created.is_ok());

    let found = store.find_role_by_name(first_tenant, "Org Admin").await;
    assert!(found.is_ok());
    assert!(found.unwrap_or(None).is_some());

    let other = store.find_role_by_name(second_tenant, "Org Admin").await;
    assert!(other.is_ok());
    assert!(other.unwrap_or(None).is_none());
}
