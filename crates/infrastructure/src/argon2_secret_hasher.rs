//! Argon2id secret hasher implementation.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};

use maklaro_application::SecretHasher;
use maklaro_core::{AppError, AppResult};

/// Argon2id hasher for generated placeholder credentials.
#[derive(Clone)]
pub struct Argon2SecretHasher {
    argon2: Argon2<'static>,
}

impl Argon2SecretHasher {
    /// Creates a hasher with recommended parameters.
    #[must_use]
    pub fn new() -> Self {
        // OWASP Password Storage: Argon2id with m=19456, t=2, p=1.
        let params = Params::new(19456, 2, 1, None).unwrap_or_else(|_| Params::default());

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2SecretHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretHasher for Argon2SecretHasher {
    fn hash_secret(&self, secret: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);

        let hash = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|error| AppError::Internal(format!("failed to hash secret: {error}")))?;

        Ok(hash.to_string())
    }
}
