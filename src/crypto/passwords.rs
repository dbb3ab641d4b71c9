//! Adaptive password hashing built around bcrypt.
//! The stored string is self-describing (version, cost, salt, hash), so the
//! work factor only matters when encoding; verification reads it back.

use bcrypt::Version;

use crate::error::{EncryptorError, Result};

/// Work factor used when nothing else is configured.
pub const DEFAULT_COST: u32 = 10;
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Hashes a password with a fresh random salt and returns the `$2a$` string
/// form, which every bcrypt implementation in use can verify.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String> {
    let parts = bcrypt::hash_with_result(plaintext, cost)
        .map_err(|e| EncryptorError::HashingFailed(format!("{e}")))?;
    Ok(parts.format_for_version(Version::TwoA))
}

/// Verifies a plaintext password against a stored bcrypt string.
/// Unparseable stored values are reported as `MalformedStoredValue`.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool> {
    bcrypt::verify(plaintext, stored_hash)
        .map_err(|e| EncryptorError::MalformedStoredValue(format!("{e}")))
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password, MIN_COST};
    use crate::error::EncryptorError;

    #[test]
    fn hashes_and_verifies_passwords() {
        let hash = hash_password("encryptor-test-password", MIN_COST).expect("hashing should succeed");
        assert!(hash.starts_with("$2a$04$"));
        assert!(verify_password("encryptor-test-password", &hash).expect("well formed"));
        assert!(!verify_password("wrong-password", &hash).expect("well formed"));
    }

    #[test]
    fn salts_every_hash() {
        let first = hash_password("same", MIN_COST).expect("hashing should succeed");
        let second = hash_password("same", MIN_COST).expect("hashing should succeed");
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_out_of_range_cost() {
        let err = hash_password("p", 2).unwrap_err();
        assert!(matches!(err, EncryptorError::HashingFailed(_)));
    }

    #[test]
    fn reports_garbage_hashes() {
        let err = verify_password("p", "not-a-bcrypt-hash").unwrap_err();
        assert!(matches!(err, EncryptorError::MalformedStoredValue(_)));
    }
}
