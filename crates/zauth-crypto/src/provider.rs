use std::fmt;

use tracing::debug;
use zauth_types::KeyType;

use crate::ecdsa::Secp256k1Ecdsa;
use crate::eddsa::Ed25519Eddsa;
use crate::error::CryptoError;
use crate::scheme::SignatureScheme;

static ECDSA: Secp256k1Ecdsa = Secp256k1Ecdsa;
static EDDSA: Ed25519Eddsa = Ed25519Eddsa;

/// Signature operations for one key type.
///
/// The key type is fixed at construction; every operation goes through the
/// scheme selected by [`SignatureProvider::new`], so derive, sign and verify
/// can never disagree about which scheme is in use.
#[derive(Clone, Copy)]
pub struct SignatureProvider {
    scheme: &'static dyn SignatureScheme,
}

impl SignatureProvider {
    pub fn new(key_type: KeyType) -> Self {
        let scheme: &'static dyn SignatureScheme = match key_type {
            KeyType::Ecdsa => &ECDSA,
            KeyType::Eddsa => &EDDSA,
        };
        Self { scheme }
    }

    /// Resolve a textual key type tag.
    ///
    /// Fails with [`CryptoError::UnsupportedKeyType`] when the tag names no
    /// supported scheme.
    pub fn from_tag(tag: &str) -> Result<Self, CryptoError> {
        Ok(Self::new(tag.parse::<KeyType>()?))
    }

    pub fn key_type(&self) -> KeyType {
        self.scheme.key_type()
    }

    pub fn generate_secret(&self) -> String {
        self.scheme.generate_secret()
    }

    pub fn derive_public_key(&self, secret: &str) -> Result<String, CryptoError> {
        self.scheme.derive_public_key(secret)
    }

    pub fn sign(&self, digest: &str, secret: &str) -> Result<String, CryptoError> {
        debug!(key_type = %self.key_type(), "signing digest");
        self.scheme.sign(digest, secret)
    }

    pub fn verify(
        &self,
        digest: &str,
        signature: &str,
        public_key: &str,
    ) -> Result<bool, CryptoError> {
        let valid = self.scheme.verify(digest, signature, public_key)?;
        if !valid {
            debug!(key_type = %self.key_type(), "signature rejected");
        }
        Ok(valid)
    }
}

impl fmt::Debug for SignatureProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureProvider({})", self.key_type())
    }
}

/// Derive the hex public key for `secret` under `key_type`.
pub fn derive_public_key(secret: &str, key_type: KeyType) -> Result<String, CryptoError> {
    SignatureProvider::new(key_type).derive_public_key(secret)
}

/// Sign a hex digest under `key_type`.
pub fn sign(digest: &str, secret: &str, key_type: KeyType) -> Result<String, CryptoError> {
    SignatureProvider::new(key_type).sign(digest, secret)
}

/// Verify a signature under `key_type`.
pub fn verify(
    digest: &str,
    signature: &str,
    public_key: &str,
    key_type: KeyType,
) -> Result<bool, CryptoError> {
    SignatureProvider::new(key_type).verify(digest, signature, public_key)
}

/// Generate a fresh secret for `key_type`.
pub fn generate_secret(key_type: KeyType) -> String {
    SignatureProvider::new(key_type).generate_secret()
}
