use maklaro_core::{AppError, AppResult};

/// Generates a high-entropy throwaway secret for a new identity.
///
/// Only the hash of this value is ever persisted; the administrator sets a
/// real credential through the handoff link, never through this secret.
pub(super) fn generate_throwaway_secret() -> AppResult<String> {
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes).map_err(|error| {
        AppError::Internal(format!("failed to generate throwaway secret: {error}"))
    })?;

    Ok(hex_encode(&bytes))
}

/// Generates a cryptographically random setup token and its SHA-256 hash.
///
/// Returns `(raw_token_hex, sha256_hash_hex)`. The raw token goes into the
/// emailed link; only the hash reaches storage.
pub(super) fn generate_setup_token() -> AppResult<(String, String)> {
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes)
        .map_err(|error| AppError::Internal(format!("failed to generate setup token: {error}")))?;

    let raw_token = hex_encode(&bytes);
    let hash = hash_token(&raw_token);
    Ok((raw_token, hash))
}

/// Computes the SHA-256 hash of a token string for storage.
pub(super) fn hash_token(raw_token: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut acc, byte| {
            let _ = write!(acc, "{byte:02x}");
            acc
        })
}
