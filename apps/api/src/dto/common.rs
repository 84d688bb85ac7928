use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/console-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub postgres: HealthDependencyStatus,
    pub role_templates: HealthDependencyStatus,
}

/// One runtime dependency health status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/console-types/src/generated/health-dependency-status.ts"
)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    pub detail: Option<String>,
}
