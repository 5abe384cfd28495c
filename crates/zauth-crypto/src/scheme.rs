use zauth_types::KeyType;

use crate::error::CryptoError;

/// A signature scheme operating on hex-encoded key material.
///
/// Implementations never hash the digest they are given: callers pass an
/// already-computed digest in hex. Keys, public keys and signatures use the
/// scheme's native hex encoding and are not interchangeable across schemes.
pub trait SignatureScheme: Send + Sync {
    /// The tag this scheme is selected by.
    fn key_type(&self) -> KeyType;

    /// Generate a fresh secret from the OS CSPRNG.
    fn generate_secret(&self) -> String;

    /// Derive the hex public key for a hex secret.
    fn derive_public_key(&self, secret: &str) -> Result<String, CryptoError>;

    /// Sign a hex digest, returning the hex signature.
    fn sign(&self, digest: &str, secret: &str) -> Result<String, CryptoError>;

    /// Check a hex signature over a hex digest.
    ///
    /// Returns `Ok(false)` for any signature that does not verify, including
    /// malformed signatures and digests. Only a public key that cannot be
    /// decoded is an error.
    fn verify(&self, digest: &str, signature: &str, public_key: &str)
        -> Result<bool, CryptoError>;
}

/// Decode hex, tolerating an odd number of digits by assuming a leading zero.
pub(crate) fn decode_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    if input.len() % 2 == 1 {
        hex::decode(format!("0{input}"))
    } else {
        hex::decode(input)
    }
}

pub(crate) fn decode_digest(digest: &str) -> Result<Vec<u8>, CryptoError> {
    decode_hex(digest).map_err(|e| CryptoError::InvalidInput(format!("digest is not hex: {e}")))
}
