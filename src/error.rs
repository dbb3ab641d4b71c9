//! Error taxonomy shared by every codec and the encryptor facade.
//! Messages never carry plaintext, stored values, or key material.

use thiserror::Error;

use crate::crypto::algorithm::CipherAlgorithm;

#[derive(Debug, Error)]
pub enum EncryptorError {
    #[error("unknown cipher algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("cipher algorithm is required to encode a value")]
    MissingAlgorithm,
    #[error("{0} is a one-way algorithm and cannot be decoded")]
    NotReversible(CipherAlgorithm),
    #[error("no secret key configured for reversible encryption")]
    KeyNotConfigured,
    #[error("invalid key length; expected at least 16 bytes")]
    InvalidKeyLength,
    #[error("key source unreadable: {0}")]
    KeySourceUnreadable(String),
    /// Only produced inside the codecs; the facade turns it into `false`.
    #[error("malformed stored value: {0}")]
    MalformedStoredValue(String),
    #[error("decryption failed")]
    DecryptionFailed,
    #[error("encryption failed")]
    EncryptionFailed,
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
}

pub type Result<T> = std::result::Result<T, EncryptorError>;
