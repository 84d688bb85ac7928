mod common;
mod platform;

pub use common::{HealthDependencyStatus, HealthResponse};
pub use platform::{
    ProvisionTenantAdminRequest, ProvisionTenantAdminResponse, RoleTemplateCatalogResponse,
    RoleTemplateResponse,
};

#[cfg(test)]
mod tests {
    use super::{
        HealthDependencyStatus, HealthResponse, ProvisionTenantAdminRequest,
        ProvisionTenantAdminResponse, RoleTemplateCatalogResponse, RoleTemplateResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        ProvisionTenantAdminRequest::export(&config)?;
        ProvisionTenantAdminResponse::export(&config)?;
        RoleTemplateResponse::export(&config)?;
        RoleTemplateCatalogResponse::export(&config)?;
        HealthResponse::export(&config)?;
        HealthDependencyStatus::export(&config)?;
        ErrorResponse::export(&config)?;

        Ok(())
    }
}
