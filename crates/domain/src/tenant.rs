//! Tenant domain types.
//!
//! Tenants are provisioned by a separate onboarding flow; this crate only
//! reads them, so the types here carry no mutation helpers.

use maklaro_core::{AppError, AppResult, NonEmptyString, TenantId};
use serde::{Deserialize, Serialize};

/// Validated routing slug used as the tenant's public subdomain label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Creates a validated slug.
    ///
    /// The value is trimmed and lowercased, must be 1 to 63 characters of
    /// `[a-z0-9-]`, and must not start or end with a hyphen (DNS label rules).
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "tenant slug must not be empty".to_owned(),
            ));
        }

        if normalized.len() > 63 {
            return Err(AppError::Validation(
                "tenant slug must not exceed 63 characters".to_owned(),
            ));
        }

        if !normalized.chars().all(|character| {
            character.is_ascii_lowercase() || character.is_ascii_digit() || character == '-'
        }) {
            return Err(AppError::Validation(format!(
                "tenant slug '{normalized}' may only contain lowercase letters, digits and hyphens"
            )));
        }

        if normalized.starts_with('-') || normalized.ends_with('-') {
            return Err(AppError::Validation(
                "tenant slug must not start or end with a hyphen".to_owned(),
            ));
        }

        Ok(Self(normalized))
    }

    /// Returns the validated slug string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for TenantSlug {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<TenantSlug> for String {
    fn from(value: TenantSlug) -> Self {
        value.0
    }
}

/// An organization boundary within the multi-tenant system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    id: TenantId,
    name: NonEmptyString,
    slug: TenantSlug,
}

impl Tenant {
    /// Creates a validated tenant.
    pub fn new(id: TenantId, name: impl Into<String>, slug: TenantSlug) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            slug,
        })
    }

    /// Returns the tenant identifier.
    #[must_use]
    pub fn id(&self) -> TenantId {
        self.id
    }

    /// Returns the tenant display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the tenant routing slug.
    #[must_use]
    pub fn slug(&self) -> &TenantSlug {
        &self.slug
    }

    /// Returns the tenant portal origin under the given base domain.
    #[must_use]
    pub fn portal_url(&self, base_domain: &str) -> String {
        format!("https://{}.{}", self.slug.as_str(), base_domain)
    }
}
