//! Configuration loader. Reads a JSON file that says where the AES key lives
//! and how expensive bcrypt should be, then builds the shared `Encryptor`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::crypto::algorithm::CipherAlgorithm;
use crate::crypto::passwords::{DEFAULT_COST, MAX_COST, MIN_COST};
use crate::crypto::secrets::SecretKey;
use crate::encryptor::Encryptor;

/// Environment variable the CLI reads the config path from.
pub const CONFIG_ENV: &str = "ENCRYPTOR_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file unreadable: {0}")]
    Io(String),
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("secret key error: {0}")]
    Key(String),
    #[error("bcrypt cost {0} outside the supported range 4..=31")]
    InvalidCost(u32),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyConfig {
    /// Environment variable holding the secret key string.
    pub key_env: Option<String>,
    /// Path to a file that contains the secret key string.
    pub key_path: Option<PathBuf>,
    /// Inline secret key, for development setups only.
    pub secret_key: Option<String>,
}

impl KeyConfig {
    /// First configured source wins; no source at all is not an error here,
    /// AES operations report it when used.
    fn build_key(&self) -> Result<Option<SecretKey>, ConfigError> {
        let key = if let Some(var) = &self.key_env {
            SecretKey::from_env_var(var)
        } else if let Some(path) = &self.key_path {
            SecretKey::from_key_file(path)
        } else if let Some(secret) = &self.secret_key {
            SecretKey::from_secret(secret)
        } else {
            return Ok(None);
        };
        key.map(Some).map_err(|e| ConfigError::Key(format!("{e}")))
    }
}

fn default_cost() -> u32 {
    DEFAULT_COST
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptorConfig {
    #[serde(default)]
    pub key: KeyConfig,
    #[serde(default = "default_cost")]
    pub bcrypt_cost: u32,
    pub default_algorithm: Option<CipherAlgorithm>,
}

impl Default for EncryptorConfig {
    fn default() -> Self {
        Self {
            key: KeyConfig::default(),
            bcrypt_cost: DEFAULT_COST,
            default_algorithm: None,
        }
    }
}

impl EncryptorConfig {
    pub fn build(&self) -> Result<Encryptor, ConfigError> {
        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidCost(self.bcrypt_cost));
        }
        let key = self.key.build_key()?;
        tracing::info!(aes_enabled = key.is_some(), bcrypt_cost = self.bcrypt_cost, "encryptor ready");
        Ok(Encryptor::new(key).with_bcrypt_cost(self.bcrypt_cost))
    }
}

/// Parses the JSON configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<EncryptorConfig, ConfigError> {
    let raw_json = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
    serde_json::from_str(&raw_json).map_err(|e| ConfigError::Parse(format!("{e}")))
}

#[cfg(test)]
mod tests {
    use super::{load_config, ConfigError, EncryptorConfig};
    use crate::crypto::algorithm::CipherAlgorithm;
    use serde_json::json;
    use std::fs;
    use tempfile::NamedTempFile;

    fn write_config(payload: serde_json::Value) -> NamedTempFile {
        let file = NamedTempFile::new().expect("temp file");
        fs::write(file.path(), serde_json::to_vec(&payload).expect("json")).expect("write config");
        file
    }

    #[test]
    fn loads_config_with_env_key() {
        let key_var = "ENCRYPTOR_TEST_SECRET_KEY";
        std::env::set_var(key_var, "1abcdefghilmnopqrstuvz2!");

        let file = write_config(json!({
            "key": { "keyEnv": key_var },
            "bcryptCost": 4,
            "defaultAlgorithm": "SSHA256"
        }));

        let config = load_config(file.path()).expect("config should load");
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.default_algorithm, Some(CipherAlgorithm::SaltedSha256));

        let encryptor = config.build().expect("encryptor should build");
        assert_eq!(
            encryptor.decode(Some("UhgavyjwSlGEJyyevj4whg=="), Some(CipherAlgorithm::Aes)).expect("decode"),
            Some("fabiano".to_string())
        );
    }

    #[test]
    fn empty_config_has_no_key() {
        let file = write_config(json!({}));
        let config = load_config(file.path()).expect("config should load");
        assert_eq!(config.bcrypt_cost, 10);
        let encryptor = config.build().expect("encryptor should build");
        assert!(!encryptor.has_key());
    }

    #[test]
    fn key_env_takes_precedence_over_inline_key() {
        let file = write_config(json!({
            "key": { "keyEnv": "ENCRYPTOR_TEST_UNSET_VARIABLE", "secretKey": "1abcdefghilmnopq" }
        }));
        let err = load_config(file.path()).expect("config should load").build().unwrap_err();
        assert!(matches!(err, ConfigError::Key(_)));
    }

    #[test]
    fn rejects_bad_cost_and_short_keys() {
        let config = EncryptorConfig { bcrypt_cost: 3, ..EncryptorConfig::default() };
        assert!(matches!(config.build(), Err(ConfigError::InvalidCost(3))));

        let file = write_config(json!({ "key": { "secretKey": "short" } }));
        let err = load_config(file.path()).expect("config should load").build().unwrap_err();
        assert!(format!("{err}").contains("invalid key length"));
    }

    #[test]
    fn rejects_unknown_algorithm_names() {
        let file = write_config(json!({ "defaultAlgorithm": "ROT13" }));
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }
}
