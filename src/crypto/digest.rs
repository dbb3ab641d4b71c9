//! Plain and salted message digests for the MD5 and SHA families.
//! Stored values are uppercase hex; salted values append the salt after the
//! digest so the split point on verify is fixed by the algorithm.

use md5::Md5;
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use subtle::ConstantTimeEq;

use crate::crypto::algorithm::DigestKind;
use crate::error::{EncryptorError, Result};

fn hash_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

/// Computes the raw digest of the concatenation of `parts`.
pub fn digest(kind: DigestKind, parts: &[&[u8]]) -> Vec<u8> {
    match kind {
        DigestKind::Md5 => hash_parts::<Md5>(parts),
        DigestKind::Sha1 => hash_parts::<Sha1>(parts),
        DigestKind::Sha256 => hash_parts::<Sha256>(parts),
        DigestKind::Sha512 => hash_parts::<Sha512>(parts),
    }
}

fn generate_salt(len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Uppercase hex of the digest of `plaintext`.
pub fn encode_plain(kind: DigestKind, plaintext: &str) -> String {
    hex::encode_upper(digest(kind, &[plaintext.as_bytes()]))
}

/// Uppercase hex of `digest(plaintext ++ salt) ++ salt` with a fresh random salt.
pub fn encode_salted(kind: DigestKind, salt_len: usize, plaintext: &str) -> String {
    let salt = generate_salt(salt_len);
    encode_with_salt(kind, plaintext, &salt)
}

fn encode_with_salt(kind: DigestKind, plaintext: &str, salt: &[u8]) -> String {
    let mut stored = digest(kind, &[plaintext.as_bytes(), salt]);
    stored.extend_from_slice(salt);
    hex::encode_upper(stored)
}

/// Checks `plaintext` against a stored digest. Any shape problem in `stored`
/// comes back as `MalformedStoredValue`; a mismatch is `Ok(false)`.
pub fn verify(kind: DigestKind, salt_len: usize, plaintext: &str, stored: &str) -> Result<bool> {
    let bytes = hex::decode(stored.trim())
        .map_err(|e| EncryptorError::MalformedStoredValue(format!("{e}")))?;
    let expected_len = kind.output_len() + salt_len;
    if bytes.len() != expected_len {
        return Err(EncryptorError::MalformedStoredValue(format!(
            "expected {expected_len} bytes, found {}",
            bytes.len()
        )));
    }

    let (digest_part, salt_part) = bytes.split_at(kind.output_len());
    let recomputed = digest(kind, &[plaintext.as_bytes(), salt_part]);
    Ok(recomputed.ct_eq(digest_part).into())
}
