//! User identity domain types and validation rules.
//!
//! Identities are global (cross-tenant); tenancy is expressed through
//! memberships and role assignments, never on the identity itself.

use maklaro_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated, case-normalized email address.
///
/// The lowercased form is the uniqueness key for identities, so every
/// lookup and insert must go through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    /// The stored value is trimmed and lowercased.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let parts: Vec<&str> = trimmed.splitn(2, '@').collect();
        if parts.len() != 2 {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        let local = parts[0];
        let domain = parts[1];

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Global account tier for a user identity.
///
/// Tiers only ever move upward through provisioning; an administrator invite
/// implies staff-level access regardless of how the identity was first created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountTier {
    /// Portal access limited to the user's own client data.
    Client,
    /// Back-office access inside the tenants the user belongs to.
    Staff,
}

impl AccountTier {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Staff => "staff",
        }
    }

    /// Parses a storage string into an account tier.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "client" => Ok(Self::Client),
            "staff" => Ok(Self::Staff),
            _ => Err(AppError::Validation(format!(
                "unknown account tier '{value}'"
            ))),
        }
    }
}

/// Mutable profile fields carried on a user identity.
///
/// Construction always goes through [`UserProfile::from_parts`], so name
/// fields are trimmed and a blank phone collapses to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    first_name: String,
    last_name: String,
    phone: Option<String>,
}

impl UserProfile {
    /// Creates a normalized profile from caller-supplied parts.
    #[must_use]
    pub fn from_parts(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            first_name: first_name.into().trim().to_owned(),
            last_name: last_name.into().trim().to_owned(),
            phone: phone
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
        }
    }

    /// Returns the first name, possibly empty.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Returns the last name, possibly empty.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Returns the phone number if one is set.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Merges supplied values into this profile without clobbering data.
    ///
    /// Supplied values fill only blank fields; a populated field is never
    /// overwritten. Returns `None` when nothing changes, so callers can skip
    /// the persistence round-trip entirely.
    #[must_use]
    pub fn merge_missing(&self, supplied: &UserProfile) -> Option<UserProfile> {
        let mut merged = self.clone();
        let mut changed = false;

        if merged.first_name.is_empty() && !supplied.first_name.is_empty() {
            merged.first_name = supplied.first_name.clone();
            changed = true;
        }

        if merged.last_name.is_empty() && !supplied.last_name.is_empty() {
            merged.last_name = supplied.last_name.clone();
            changed = true;
        }

        if merged.phone.is_none() && supplied.phone.is_some() {
            merged.phone = supplied.phone.clone();
            changed = true;
        }

        changed.then_some(merged)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{AccountTier, EmailAddress, UserProfile};

    #[test]
    fn valid_email_is_accepted_and_lowercased() {
        let email = EmailAddress::new("  Admin@Brokerage.EXAMPLE ");
        assert!(email.is_ok());
        assert_eq!(
            email.unwrap_or_else(|_| panic!("test")).as_str(),
            "admin@brokerage.example"
        );
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(EmailAddress::new("noatsign").is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("user@nodot").is_err());
    }

    #[test]
    fn email_with_empty_local_part_is_rejected() {
        assert!(EmailAddress::new("@example.com").is_err());
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(EmailAddress::new("   ").is_err());
    }

    #[test]
    fn overlong_email_is_rejected() {
        let local = "a".repeat(250);
        assert!(EmailAddress::new(format!("{local}@example.com")).is_err());
    }

    #[test]
    fn account_tier_roundtrips_storage_value() {
        let parsed = AccountTier::parse(AccountTier::Staff.as_str());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or(AccountTier::Client), AccountTier::Staff);
    }

    #[test]
    fn unknown_account_tier_is_rejected() {
        assert!(AccountTier::parse("superuser").is_err());
    }

    #[test]
    fn from_parts_trims_names_and_drops_blank_phone() {
        let profile = UserProfile::from_parts("  Ada ", " Lovelace", Some("   ".to_owned()));
        assert_eq!(profile.first_name(), "Ada");
        assert_eq!(profile.last_name(), "Lovelace");
        assert_eq!(profile.phone(), None);
    }

    #[test]
    fn merge_fills_blank_fields() {
        let current = UserProfile::from_parts("", "Lovelace", None);
        let supplied = UserProfile::from_parts("Ada", "Byron", Some("+39 02 1234".to_owned()));

        let merged = current.merge_missing(&supplied);
        assert!(merged.is_some());

        let merged = merged.unwrap_or_else(|| panic!("test"));
        assert_eq!(merged.first_name(), "Ada");
        assert_eq!(merged.last_name(), "Lovelace");
        assert_eq!(merged.phone(), Some("+39 02 1234"));
    }

    #[test]
    fn merge_returns_none_when_nothing_changes() {
        let current = UserProfile::from_parts("Ada", "Lovelace", Some("+39 02 1234".to_owned()));
        let supplied = UserProfile::from_parts("Grace", "Hopper", Some("+1 555 0100".to_owned()));

        assert!(current.merge_missing(&supplied).is_none());
    }

    proptest! {
        #[test]
        fn merge_never_overwrites_populated_fields(
            current_first in "[A-Za-z]{1,12}",
            current_phone in "[0-9]{6,10}",
            supplied_first in ".{0,20}",
            supplied_last in ".{0,20}",
            supplied_phone in ".{0,12}",
        ) {
            let current =
                UserProfile::from_parts(current_first, "", Some(current_phone));
            let supplied =
                UserProfile::from_parts(supplied_first, supplied_last, Some(supplied_phone));

            let merged = current
                .merge_missing(&supplied)
                .unwrap_or_else(|| current.clone());

            prop_assert_eq!(merged.first_name(), current.first_name());
            prop_assert_eq!(merged.phone(), current.phone());
        }

        #[test]
        fn merge_is_idempotent(
            current_first in ".{0,12}",
            current_last in ".{0,12}",
            supplied_first in ".{0,12}",
            supplied_last in ".{0,12}",
        ) {
            let current = UserProfile::from_parts(current_first, current_last, None);
            let supplied = UserProfile::from_parts(supplied_first, supplied_last, None);

            let once = current
                .merge_missing(&supplied)
                .unwrap_or_else(|| current.clone());

            prop_assert!(once.merge_missing(&supplied).is_none());
        }
    }
}
