//! Reversible secret encryption with AES-128 in ECB mode and PKCS#7 padding.
//! There is no IV: the same plaintext under the same key always produces the
//! same base64 value, which existing stored ciphertexts depend on.

use std::fmt;
use std::fs;
use std::path::Path;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use aes::Aes128;
use base64::{engine::general_purpose::STANDARD, Engine};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{EncryptorError, Result};

pub const KEY_LEN: usize = 16;

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

/// Process-wide AES key. Only the first 16 bytes of the configured string are
/// used; the bytes are zeroed on drop and never printed.
pub struct SecretKey {
    bytes: [u8; KEY_LEN],
}

impl SecretKey {
    /// Builds a key from the UTF-8 bytes of a configured secret string.
    pub fn from_secret(secret: &str) -> Result<Self> {
        let raw = secret.as_bytes();
        if raw.len() < KEY_LEN {
            return Err(EncryptorError::InvalidKeyLength);
        }
        if raw.len() > KEY_LEN {
            tracing::warn!(configured_len = raw.len(), "secret key longer than 16 bytes; truncating");
        }
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&raw[..KEY_LEN]);
        Ok(Self { bytes })
    }

    /// Reads the secret string from an environment variable.
    pub fn from_env_var(var: &str) -> Result<Self> {
        let mut secret =
            std::env::var(var).map_err(|e| EncryptorError::KeySourceUnreadable(format!("{var}: {e}")))?;
        let key = Self::from_secret(&secret);
        secret.zeroize();
        key
    }

    /// Reads the secret string from disk, ignoring surrounding whitespace.
    pub fn from_key_file(path: &Path) -> Result<Self> {
        let mut content = fs::read_to_string(path)
            .map_err(|e| EncryptorError::KeySourceUnreadable(format!("{}: {e}", path.display())))?;
        let key = Self::from_secret(content.trim());
        content.zeroize();
        key
    }

    /// Encrypts `plaintext` and returns standard base64 of the raw ciphertext.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = Aes128EcbEnc::new_from_slice(&self.bytes).map_err(|_| EncryptorError::EncryptionFailed)?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        Ok(STANDARD.encode(ciphertext))
    }

    /// Reverses `encrypt`. Bad base64, a wrong key, broken padding, or
    /// non UTF-8 output all surface as `DecryptionFailed`.
    pub fn decrypt(&self, stored: &str) -> Result<String> {
        let ciphertext = STANDARD
            .decode(stored.trim().as_bytes())
            .map_err(|_| EncryptorError::DecryptionFailed)?;
        let cipher = Aes128EcbDec::new_from_slice(&self.bytes).map_err(|_| EncryptorError::DecryptionFailed)?;
        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| EncryptorError::DecryptionFailed)?;
        String::from_utf8(plaintext).map_err(|_| EncryptorError::DecryptionFailed)
    }

    /// Decrypts `stored` and compares it with `plaintext` in constant time.
    pub fn verify(&self, plaintext: &str, stored: &str) -> Result<bool> {
        let decrypted = self.decrypt(stored)?;
        Ok(decrypted.as_bytes().ct_eq(plaintext.as_bytes()).into())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::SecretKey;
    use crate::error::EncryptorError;
    use std::fs;
    use tempfile::NamedTempFile;

    const TEST_SECRET: &str = "1abcdefghilmnopqrstuvz2!";

    fn test_key() -> SecretKey {
        SecretKey::from_secret(TEST_SECRET).expect("key should be valid")
    }

    #[test]
    fn encrypts_known_vectors() {
        let key = test_key();
        assert_eq!(key.encrypt("fabiano").expect("encrypt"), "UhgavyjwSlGEJyyevj4whg==");
        assert_eq!(key.encrypt("").expect("encrypt"), "FN0NSfsM70DxXlF9hhLitQ==");
    }

    #[test]
    fn decrypts_known_vectors() {
        let key = test_key();
        assert_eq!(key.decrypt("UhgavyjwSlGEJyyevj4whg==").expect("decrypt"), "fabiano");
        assert_eq!(key.decrypt("FN0NSfsM70DxXlF9hhLitQ==").expect("decrypt"), "");
    }

    #[test]
    fn encrypts_and_decrypts_round_trip() {
        let key = test_key();
        let stored = key.encrypt("a secret spanning more than one block").expect("encrypt");
        assert_eq!(stored, key.encrypt("a secret spanning more than one block").expect("encrypt"));
        assert_eq!(key.decrypt(&stored).expect("decrypt"), "a secret spanning more than one block");
    }

    #[test]
    fn rejects_short_keys() {
        let err = SecretKey::from_secret("too-short").unwrap_err();
        assert!(format!("{err}").contains("invalid key length"));
    }

    #[test]
    fn wrong_key_fails_to_decrypt() {
        let other = SecretKey::from_secret("zyxwvutsrqponmlk").expect("key should be valid");
        let stored = test_key().encrypt("fabiano").expect("encrypt");
        assert!(matches!(other.decrypt(&stored), Err(EncryptorError::DecryptionFailed)));
    }

    #[test]
    fn handles_invalid_ciphertext() {
        let key = test_key();
        assert!(matches!(key.decrypt("%%%not base64%%%"), Err(EncryptorError::DecryptionFailed)));
        // five bytes is not a whole block
        assert!(matches!(key.decrypt("AAAAAAA="), Err(EncryptorError::DecryptionFailed)));
    }

    #[test]
    fn verifies_against_stored_ciphertext() {
        let key = test_key();
        assert!(key.verify("fabiano", "UhgavyjwSlGEJyyevj4whg==").expect("decrypt"));
        assert!(!key.verify("fabian", "UhgavyjwSlGEJyyevj4whg==").expect("decrypt"));
    }

    #[test]
    fn loads_key_from_file() {
        let file = NamedTempFile::new().expect("temp file");
        fs::write(file.path(), format!("{TEST_SECRET}\n")).expect("write key");
        let key = SecretKey::from_key_file(file.path()).expect("key file should load");
        assert_eq!(key.encrypt("fabiano").expect("encrypt"), "UhgavyjwSlGEJyyevj4whg==");
    }

    #[test]
    fn debug_output_is_redacted() {
        assert_eq!(format!("{:?}", test_key()), "SecretKey(<redacted>)");
    }
}
