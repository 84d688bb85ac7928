use maklaro_domain::RoleTemplateRegistry;

use super::*;

pub(super) async fn check_postgres(pool: sqlx::PgPool) -> HealthDependencyStatus {
    let check = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&pool)
        .await;

    match check {
        Ok(_) => HealthDependencyStatus {
            status: "ok",
            detail: None,
        },
        Err(error) => HealthDependencyStatus {
            status: "error",
            detail: Some(format!("postgres check failed: {error}")),
        },
    }
}

pub(super) fn check_role_templates() -> HealthDependencyStatus {
    match RoleTemplateRegistry::builtin() {
        Ok(_) => HealthDependencyStatus {
            status: "ok",
            detail: None,
        },
        Err(error) => HealthDependencyStatus {
            status: "error",
            detail: Some(format!("role template registry is invalid: {error}")),
        },
    }
}
