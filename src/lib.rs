//! Encoding, decoding, and verification of passwords and secrets.
//! One `Encryptor` fronts plain digests, salted digests, bcrypt, and AES so
//! callers never need to know which shape a stored value has.

pub mod config;
pub mod crypto;
pub mod encryptor;
pub mod error;

pub use crypto::algorithm::CipherAlgorithm;
pub use crypto::secrets::SecretKey;
pub use encryptor::Encryptor;
pub use error::EncryptorError;
