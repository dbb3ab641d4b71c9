//! Static catalog of the supported cipher algorithms.
//! Every algorithm name maps to exactly one immutable `AlgorithmSpec`, and the
//! facade dispatches on the entry's `Shape` rather than on the name.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{EncryptorError, Result};

/// Salt length used by every salted digest variant.
pub const SALT_LEN: usize = 8;

/// Closed set of algorithm tags accepted by the encryptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum CipherAlgorithm {
    /// Legacy alias of `SHA1`.
    #[serde(rename = "SHA")]
    Sha,
    #[serde(rename = "SHA1")]
    Sha1,
    #[serde(rename = "SHA256")]
    Sha256,
    #[serde(rename = "SHA512")]
    Sha512,
    #[serde(rename = "AES")]
    Aes,
    #[serde(rename = "BCRYPT")]
    Bcrypt,
    #[serde(rename = "SMD5")]
    SaltedMd5,
    #[serde(rename = "SSHA")]
    SaltedSha1,
    /// Historically distinct label for `SSHA`; behaves identically.
    #[serde(rename = "SSHA1")]
    SaltedSha1Alias,
    #[serde(rename = "SSHA256")]
    SaltedSha256,
    #[serde(rename = "SSHA512")]
    SaltedSha512,
}

/// Hash functions backing the digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl DigestKind {
    pub const fn output_len(self) -> usize {
        match self {
            DigestKind::Md5 => 16,
            DigestKind::Sha1 => 20,
            DigestKind::Sha256 => 32,
            DigestKind::Sha512 => 64,
        }
    }
}

/// Which codec handles an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    PlainDigest(DigestKind),
    SaltedDigest(DigestKind),
    Adaptive,
    Reversible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmSpec {
    pub algorithm: CipherAlgorithm,
    /// Name accepted in configuration and on the CLI.
    pub name: &'static str,
    /// Legacy digest name, `S-` prefixed for salted variants.
    pub standard_name: &'static str,
    pub shape: Shape,
    pub salt_len: usize,
}

impl AlgorithmSpec {
    pub fn is_reversible(&self) -> bool {
        matches!(self.shape, Shape::Reversible)
    }

    pub fn is_salted(&self) -> bool {
        matches!(self.shape, Shape::SaltedDigest(_))
    }

    pub fn is_adaptive(&self) -> bool {
        matches!(self.shape, Shape::Adaptive)
    }

    pub fn digest_kind(&self) -> Option<DigestKind> {
        match self.shape {
            Shape::PlainDigest(kind) | Shape::SaltedDigest(kind) => Some(kind),
            Shape::Adaptive | Shape::Reversible => None,
        }
    }

    pub fn digest_len(&self) -> Option<usize> {
        self.digest_kind().map(DigestKind::output_len)
    }

    /// Byte length of a hex-decoded stored value, for digest algorithms only.
    pub fn encoded_len(&self) -> Option<usize> {
        self.digest_len().map(|len| len + self.salt_len)
    }
}

const fn plain(
    algorithm: CipherAlgorithm,
    name: &'static str,
    standard_name: &'static str,
    kind: DigestKind,
) -> AlgorithmSpec {
    AlgorithmSpec {
        algorithm,
        name,
        standard_name,
        shape: Shape::PlainDigest(kind),
        salt_len: 0,
    }
}

const fn salted(
    algorithm: CipherAlgorithm,
    name: &'static str,
    standard_name: &'static str,
    kind: DigestKind,
) -> AlgorithmSpec {
    AlgorithmSpec {
        algorithm,
        name,
        standard_name,
        shape: Shape::SaltedDigest(kind),
        salt_len: SALT_LEN,
    }
}

static CATALOG: [AlgorithmSpec; 11] = [
    plain(CipherAlgorithm::Sha, "SHA", "SHA-1", DigestKind::Sha1),
    plain(CipherAlgorithm::Sha1, "SHA1", "SHA-1", DigestKind::Sha1),
    plain(CipherAlgorithm::Sha256, "SHA256", "SHA-256", DigestKind::Sha256),
    plain(CipherAlgorithm::Sha512, "SHA512", "SHA-512", DigestKind::Sha512),
    AlgorithmSpec {
        algorithm: CipherAlgorithm::Aes,
        name: "AES",
        standard_name: "AES",
        shape: Shape::Reversible,
        salt_len: 0,
    },
    AlgorithmSpec {
        algorithm: CipherAlgorithm::Bcrypt,
        name: "BCRYPT",
        standard_name: "BCRYPT",
        shape: Shape::Adaptive,
        salt_len: 0,
    },
    salted(CipherAlgorithm::SaltedMd5, "SMD5", "S-MD5", DigestKind::Md5),
    salted(CipherAlgorithm::SaltedSha1, "SSHA", "S-SHA", DigestKind::Sha1),
    salted(CipherAlgorithm::SaltedSha1Alias, "SSHA1", "S-SHA-1", DigestKind::Sha1),
    salted(CipherAlgorithm::SaltedSha256, "SSHA256", "S-SHA-256", DigestKind::Sha256),
    salted(CipherAlgorithm::SaltedSha512, "SSHA512", "S-SHA-512", DigestKind::Sha512),
];

/// Resolves an algorithm name (case-insensitive) to its catalog entry.
pub fn lookup(name: &str) -> Result<&'static AlgorithmSpec> {
    let trimmed = name.trim();
    CATALOG
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| EncryptorError::UnknownAlgorithm(trimmed.to_string()))
}

impl CipherAlgorithm {
    pub const ALL: [CipherAlgorithm; 11] = [
        CipherAlgorithm::Sha,
        CipherAlgorithm::Sha1,
        CipherAlgorithm::Sha256,
        CipherAlgorithm::Sha512,
        CipherAlgorithm::Aes,
        CipherAlgorithm::Bcrypt,
        CipherAlgorithm::SaltedMd5,
        CipherAlgorithm::SaltedSha1,
        CipherAlgorithm::SaltedSha1Alias,
        CipherAlgorithm::SaltedSha256,
        CipherAlgorithm::SaltedSha512,
    ];

    pub fn spec(self) -> &'static AlgorithmSpec {
        // CATALOG and the enum share declaration order.
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherAlgorithm {
    type Err = EncryptorError;

    fn from_str(value: &str) -> Result<Self> {
        lookup(value).map(|spec| spec.algorithm)
    }
}
