//! The encryptor facade: one entry point for encoding, decoding, and verifying
//! secrets under any catalogued algorithm.
//!
//! Absent input is tolerated (absent result or `false`), while configuration
//! mistakes such as an unknown algorithm or a missing AES key are returned as
//! errors. `verify` never fails: anything wrong with the stored value is
//! logged at debug level and reported as a mismatch.
//!
//! Build one `Encryptor` at startup and share it (typically behind an `Arc`);
//! it holds no mutable state.

use crate::crypto::algorithm::{lookup, CipherAlgorithm, Shape};
use crate::crypto::digest;
use crate::crypto::passwords::{self, DEFAULT_COST};
use crate::crypto::secrets::SecretKey;
use crate::error::{EncryptorError, Result};

#[derive(Debug)]
pub struct Encryptor {
    key: Option<SecretKey>,
    bcrypt_cost: u32,
}

impl Encryptor {
    /// Builds an encryptor. Without a key every AES operation fails with
    /// `KeyNotConfigured`; the other algorithms are unaffected.
    pub fn new(key: Option<SecretKey>) -> Self {
        Self { key, bcrypt_cost: DEFAULT_COST }
    }

    /// Overrides the bcrypt work factor used by `encode`.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    fn key(&self) -> Result<&SecretKey> {
        self.key.as_ref().ok_or(EncryptorError::KeyNotConfigured)
    }

    /// Encodes `plaintext` with `algorithm`. An absent plaintext yields
    /// `Ok(None)` without touching any codec; an absent algorithm with a
    /// present plaintext is a caller error.
    pub fn encode(&self, plaintext: Option<&str>, algorithm: Option<CipherAlgorithm>) -> Result<Option<String>> {
        let Some(plaintext) = plaintext else {
            return Ok(None);
        };
        let algorithm = algorithm.ok_or(EncryptorError::MissingAlgorithm)?;
        let spec = algorithm.spec();

        let encoded = match spec.shape {
            Shape::PlainDigest(kind) => digest::encode_plain(kind, plaintext),
            Shape::SaltedDigest(kind) => digest::encode_salted(kind, spec.salt_len, plaintext),
            Shape::Adaptive => passwords::hash_password(plaintext, self.bcrypt_cost)?,
            Shape::Reversible => self.key()?.encrypt(plaintext)?,
        };
        Ok(Some(encoded))
    }

    /// Recovers the plaintext of a value stored with a reversible algorithm.
    /// An absent stored value or algorithm yields `Ok(None)`.
    pub fn decode(&self, stored: Option<&str>, algorithm: Option<CipherAlgorithm>) -> Result<Option<String>> {
        let (Some(stored), Some(algorithm)) = (stored, algorithm) else {
            return Ok(None);
        };

        match algorithm.spec().shape {
            Shape::Reversible => self.key()?.decrypt(stored).map(Some),
            Shape::PlainDigest(_) | Shape::SaltedDigest(_) | Shape::Adaptive => {
                Err(EncryptorError::NotReversible(algorithm))
            }
        }
    }

    /// Checks `plaintext` against `stored`. Returns `false` whenever either
    /// input is absent, the stored value is malformed, or decryption fails.
    pub fn verify(&self, plaintext: Option<&str>, algorithm: Option<CipherAlgorithm>, stored: Option<&str>) -> bool {
        let (Some(plaintext), Some(algorithm), Some(stored)) = (plaintext, algorithm, stored) else {
            return false;
        };

        match self.try_verify(plaintext, algorithm, stored) {
            Ok(matches) => matches,
            Err(err) => {
                tracing::debug!(%algorithm, error = %err, "verification failed");
                false
            }
        }
    }

    fn try_verify(&self, plaintext: &str, algorithm: CipherAlgorithm, stored: &str) -> Result<bool> {
        let spec = algorithm.spec();
        match spec.shape {
            Shape::PlainDigest(kind) | Shape::SaltedDigest(kind) => {
                digest::verify(kind, spec.salt_len, plaintext, stored)
            }
            Shape::Adaptive => passwords::verify_password(plaintext, stored),
            Shape::Reversible => self.key()?.verify(plaintext, stored),
        }
    }

    /// `encode` with the algorithm given by name.
    pub fn encode_named(&self, plaintext: Option<&str>, algorithm: &str) -> Result<Option<String>> {
        let algorithm = lookup(algorithm)?.algorithm;
        self.encode(plaintext, Some(algorithm))
    }

    /// `decode` with the algorithm given by name.
    pub fn decode_named(&self, stored: Option<&str>, algorithm: &str) -> Result<Option<String>> {
        let algorithm = lookup(algorithm)?.algorithm;
        self.decode(stored, Some(algorithm))
    }

    /// `verify` with the algorithm given by name; unknown names never match.
    pub fn verify_named(&self, plaintext: Option<&str>, algorithm: &str, stored: Option<&str>) -> bool {
        match lookup(algorithm) {
            Ok(spec) => self.verify(plaintext, Some(spec.algorithm), stored),
            Err(err) => {
                tracing::debug!(error = %err, "verification failed");
                false
            }
        }
    }
}
