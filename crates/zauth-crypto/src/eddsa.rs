//! EdDSA over ed25519.
//!
//! Secrets are 32-byte seeds in hex, public keys are 32-byte compressed
//! points in lowercase hex, signatures are the raw 64 bytes in uppercase hex.
//! Signature hex is accepted in either case.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use tracing::debug;
use zauth_types::KeyType;

use crate::error::CryptoError;
use crate::scheme::{decode_digest, SignatureScheme};

#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Eddsa;

impl Ed25519Eddsa {
    fn signing_key(secret: &str) -> Result<SigningKey, CryptoError> {
        let bytes = hex::decode(secret)
            .map_err(|e| CryptoError::malformed(KeyType::Eddsa, format!("secret is not hex: {e}")))?;
        let seed: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            CryptoError::malformed(
                KeyType::Eddsa,
                format!("secret must be a 32-byte seed, got {} bytes", b.len()),
            )
        })?;
        Ok(SigningKey::from_bytes(&seed))
    }

    fn verifying_key(public_key: &str) -> Result<VerifyingKey, CryptoError> {
        let bytes = hex::decode(public_key).map_err(|e| {
            CryptoError::malformed(KeyType::Eddsa, format!("public key is not hex: {e}"))
        })?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            CryptoError::malformed(
                KeyType::Eddsa,
                format!("public key must be 32 bytes, got {}", b.len()),
            )
        })?;
        VerifyingKey::from_bytes(&bytes)
            .map_err(|_| CryptoError::malformed(KeyType::Eddsa, "public key is not a curve point"))
    }
}

impl SignatureScheme for Ed25519Eddsa {
    fn key_type(&self) -> KeyType {
        KeyType::Eddsa
    }

    fn generate_secret(&self) -> String {
        let key = SigningKey::generate(&mut rand::rngs::OsRng);
        hex::encode(key.to_bytes())
    }

    fn derive_public_key(&self, secret: &str) -> Result<String, CryptoError> {
        let key = Self::signing_key(secret)?;
        Ok(hex::encode(key.verifying_key().to_bytes()))
    }

    fn sign(&self, digest: &str, secret: &str) -> Result<String, CryptoError> {
        let key = Self::signing_key(secret)?;
        let message = decode_digest(digest)?;
        Ok(hex::encode_upper(key.sign(&message).to_bytes()))
    }

    fn verify(&self, digest: &str, signature: &str, public_key: &str) -> Result<bool, CryptoError> {
        let key = Self::verifying_key(public_key)?;
        let Ok(message) = decode_digest(digest) else {
            debug!("eddsa verify: digest is not hex");
            return Ok(false);
        };
        let Some(signature) = hex::decode(signature)
            .ok()
            .and_then(|raw| Signature::from_slice(&raw).ok())
        else {
            debug!("eddsa verify: signature is not 64-byte hex");
            return Ok(false);
        };
        Ok(key.verify(&message, &signature).is_ok())
    }
}
