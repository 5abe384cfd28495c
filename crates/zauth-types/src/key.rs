use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Signature scheme tag.
///
/// The enumeration is closed: every operation that dispatches on a key type
/// handles exactly these two variants. Tags that arrive as text (command
/// line, JSON) go through [`KeyType::from_str`], which rejects anything that
/// names no variant instead of falling back to a default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyType {
    /// ECDSA over secp256k1. Signatures are DER-encoded hex.
    Ecdsa,
    /// EdDSA over ed25519. Signatures are raw 64-byte hex.
    Eddsa,
}

impl KeyType {
    /// Every supported key type, in tag order.
    pub const ALL: [KeyType; 2] = [KeyType::Ecdsa, KeyType::Eddsa];

    /// Canonical wire tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyType::Ecdsa => "ECDSA",
            KeyType::Eddsa => "EDDSA",
        }
    }

    /// Name of the curve the scheme operates on.
    pub const fn curve(&self) -> &'static str {
        match self {
            KeyType::Ecdsa => "secp256k1",
            KeyType::Eddsa => "ed25519",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ECDSA") {
            Ok(KeyType::Ecdsa)
        } else if s.eq_ignore_ascii_case("EDDSA") {
            Ok(KeyType::Eddsa)
        } else {
            Err(TypeError::UnsupportedKeyType(s.to_string()))
        }
    }
}

impl TryFrom<String> for KeyType {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyType> for String {
    fn from(key_type: KeyType) -> Self {
        key_type.as_str().to_string()
    }
}
