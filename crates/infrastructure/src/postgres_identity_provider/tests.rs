use chrono::{Duration, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use maklaro_application::{IdentityProvider, NewIdentity};
use maklaro_domain::{AccountTier, UserProfile};

use super::PostgresIdentityProvider;

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
        panic!("failed to run migrations for postgres identity tests: {error}");
    }

    Some(pool)
}

fn unique_email() -> String {
    format!("admin-{}@test.example", uuid::Uuid::new_v4().simple())
}

fn staff_identity(email: &str) -> NewIdentity {
    NewIdentity {
        email: email.to_owned(),
        secret_hash: "$argon2id$v=19$m=19456,t=2,p=1$dGVzdA$dGVzdA".to_owned(),
        profile: UserProfile::from_parts("Nora", "Brandt", None),
        language: "en".to_owned(),
        account_tier: AccountTier::Staff,
        confirmed: true,
    }
}

#[tokio::test]
async fn insert_then_find_roundtrips_the_identity() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let provider = PostgresIdentityProvider::new(pool);
    let email = unique_email();

    let created = provider.insert_identity(&staff_identity(&email)).await;
    assert!(created.is_ok());
    let created = created.unwrap_or_else(|_| panic!("test"));
    assert!(created.is_some());
    let created = created.unwrap_or_else(|| panic!("test"));
    assert_eq!(created.email, email);
    assert_eq!(created.account_tier, AccountTier::Staff);
    assert!(created.confirmed);

    let found = provider.find_identity_by_email(&email).await;
    assert!(found.is_ok());
    let found = found.unwrap_or_else(|_| panic!("test"));
    assert!(found.is_some());
    assert_eq!(found.unwrap_or_else(|| panic!("test")).id, created.id);
}

#[tokio::test]
async fn conflicting_insert_returns_none() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let provider = PostgresIdentityProvider::new(pool);
    let email = unique_email();

    let first = provider.insert_identity(&staff_identity(&email)).await;
    assert!(first.is_ok());
    assert!(first.unwrap_or_else(|_| panic!("test")).is_some());

    let second = provider.insert_identity(&staff_identity(&email)).await;
    assert!(second.is_ok());
    assert!(second.unwrap_or_else(|_| panic!("test")).is_none());
}

#[tokio::test]
async fn promote_to_staff_upgrades_client_identities() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let provider = PostgresIdentityProvider::new(pool);
    let email = unique_email();

    let mut identity = staff_identity(&email);
    identity.account_tier = AccountTier::Client;
    identity.confirmed = false;

    let created = provider.insert_identity(&identity).await;
    assert!(created.is_ok());
    let created = created
        .unwrap_or_else(|_| panic!("test"))
        .unwrap_or_else(|| panic!("test"));
    assert_eq!(created.account_tier, AccountTier::Client);
    assert!(!created.confirmed);

    let promoted = provider.promote_to_staff(created.id).await;
    assert!(promoted.is_ok());

    let found = provider.find_identity_by_email(&email).await;
    let found = found
        .unwrap_or_else(|_| panic!("test"))
        .unwrap_or_else(|| panic!("test"));
    assert_eq!(found.account_tier, AccountTier::Staff);
}

#[tokio::test]
async fn update_profile_replaces_stored_fields() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let provider = PostgresIdentityProvider::new(pool);
    let email = unique_email();

    let mut identity = staff_identity(&email);
    identity.profile = UserProfile::from_parts("", "", None);

    let created = provider.insert_identity(&identity).await;
    assert!(created.is_ok());
    let created = created
        .unwrap_or_else(|_| panic!("test"))
        .unwrap_or_else(|| panic!("test"));

    let updated_profile =
        UserProfile::from_parts("Nora", "Brandt", Some("+49 30 123456".to_owned()));
    let updated = provider.update_profile(created.id, &updated_profile).await;
    assert!(updated.is_ok());

    let found = provider.find_identity_by_email(&email).await;
    let found = found
        .unwrap_or_else(|_| panic!("test"))
        .unwrap_or_else(|| panic!("test"));
    assert_eq!(found.profile.first_name(), "Nora");
    assert_eq!(found.profile.last_name(), "Brandt");
    assert_eq!(found.profile.phone(), Some("+49 30 123456"));
}

#[tokio::test]
async fn storing_a_new_setup_token_retires_the_previous_one() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let provider = PostgresIdentityProvider::new(pool.clone());
    let email = unique_email();
    let expires_at = Utc::now() + Duration::hours(72);

    let first = provider
        .store_credential_setup_token(&email, "hash-one", "https://acme.test.example", expires_at)
        .await;
    assert!(first.is_ok());

    let second = provider
        .store_credential_setup_token(&email, "hash-two", "https://acme.test.example", expires_at)
        .await;
    assert!(second.is_ok());

    let live_hashes = sqlx::query_scalar::<_, String>(
        r#"
            SELECT token_hash
            FROM credential_setup_tokens
            WHERE email = $1 AND used_at IS NULL
            "#,
    )
    .bind(&email)
    .fetch_all(&pool)
    .await;

    assert_eq!(live_hashes.unwrap_or_default(), vec!["hash-two".to_owned()]);
}
