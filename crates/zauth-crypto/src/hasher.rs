use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// Hash function used to combine Merkle nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha256 => f.write_str("sha256"),
            HashAlgorithm::Blake3 => f.write_str("blake3"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(CryptoError::InvalidInput(format!(
                "unknown hash algorithm: {other}"
            ))),
        }
    }
}

/// String hasher for Merkle nodes.
///
/// Hashes the UTF-8 bytes of its input and returns lowercase hex. There is
/// no domain tag or length prefix: a parent node is exactly
/// `hash(left + right)`, so any verifier using the same algorithm can
/// rebuild the root from the plain leaf strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeHasher {
    algorithm: HashAlgorithm,
}

impl NodeHasher {
    /// SHA-256 hasher.
    pub const SHA256: Self = Self {
        algorithm: HashAlgorithm::Sha256,
    };
    /// BLAKE3 hasher.
    pub const BLAKE3: Self = Self {
        algorithm: HashAlgorithm::Blake3,
    };

    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Hash a string, returning lowercase hex.
    pub fn hash(&self, input: &str) -> String {
        match self.algorithm {
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
            HashAlgorithm::Blake3 => blake3::hash(input.as_bytes()).to_hex().to_string(),
        }
    }

    /// Hash the concatenation of two nodes.
    pub fn hash_pair(&self, left: &str, right: &str) -> String {
        let mut joined = String::with_capacity(left.len() + right.len());
        joined.push_str(left);
        joined.push_str(right);
        self.hash(&joined)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}
