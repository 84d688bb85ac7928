use maklaro_domain::{AccountTier, UserId, UserProfile};

/// User identity record as persisted by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Unique user identifier.
    pub id: UserId,
    /// Canonical lowercased email address.
    pub email: String,
    /// Profile fields.
    pub profile: UserProfile,
    /// Preferred interface language.
    pub language: String,
    /// Global account tier.
    pub account_tier: AccountTier,
    /// Whether the account may sign in without further confirmation.
    pub confirmed: bool,
}

/// Input payload for creating a new identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    /// Canonical lowercased email address.
    pub email: String,
    /// Hash of the generated throwaway secret. The raw secret never leaves
    /// the resolver and is never delivered to anyone.
    pub secret_hash: String,
    /// Initial profile fields.
    pub profile: UserProfile,
    /// Preferred interface language.
    pub language: String,
    /// Tier the identity starts at.
    pub account_tier: AccountTier,
    /// Whether the identity is created pre-confirmed.
    pub confirmed: bool,
}
