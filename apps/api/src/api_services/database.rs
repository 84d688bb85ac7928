use maklaro_core::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Upper bound for the API's Postgres connection pool.
const MAX_POOL_CONNECTIONS: u32 = 10;

/// Connects to Postgres and brings the schema up to date.
///
/// Migrations are embedded at compile time, so a fresh database and an
/// already-migrated one go through the same path.
pub async fn connect_and_migrate(database_url: &str) -> Result<PgPool, AppError> {
    let pool = connect_pool(database_url).await?;
    apply_migrations(&pool).await?;

    Ok(pool)
}

async fn connect_pool(database_url: &str) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(MAX_POOL_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Store(format!("failed to connect to database: {error}")))
}

async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(pool)
        .await
        .map_err(|error| AppError::Store(format!("failed to run migrations: {error}")))
}
