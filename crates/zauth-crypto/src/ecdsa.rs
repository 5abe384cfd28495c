//! ECDSA over secp256k1.
//!
//! Secrets are private scalars in hex, public keys are SEC1 points in hex
//! (uncompressed on output, either form on input), signatures are DER in
//! lowercase hex. Signing is deterministic (RFC 6979) and always yields a
//! low-S signature; verification also accepts high-S signatures.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use tracing::debug;
use zauth_types::KeyType;

use crate::error::CryptoError;
use crate::scheme::{decode_digest, decode_hex, SignatureScheme};

const SCALAR_LEN: usize = 32;

#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Ecdsa;

impl Secp256k1Ecdsa {
    fn signing_key(secret: &str) -> Result<SigningKey, CryptoError> {
        let bytes = decode_hex(secret)
            .map_err(|e| CryptoError::malformed(KeyType::Ecdsa, format!("secret is not hex: {e}")))?;
        // Out-of-range secrets are rejected, not reduced modulo n.
        if bytes.is_empty() || bytes.len() > SCALAR_LEN {
            return Err(CryptoError::malformed(
                KeyType::Ecdsa,
                format!("secret must be 1 to {SCALAR_LEN} bytes, got {}", bytes.len()),
            ));
        }
        let mut padded = [0u8; SCALAR_LEN];
        padded[SCALAR_LEN - bytes.len()..].copy_from_slice(&bytes);
        SigningKey::from_slice(&padded)
            .map_err(|_| CryptoError::malformed(KeyType::Ecdsa, "secret is not a valid scalar"))
    }

    fn verifying_key(public_key: &str) -> Result<VerifyingKey, CryptoError> {
        let bytes = hex::decode(public_key).map_err(|e| {
            CryptoError::malformed(KeyType::Ecdsa, format!("public key is not hex: {e}"))
        })?;
        VerifyingKey::from_sec1_bytes(&bytes)
            .map_err(|_| CryptoError::malformed(KeyType::Ecdsa, "public key is not a SEC1 point"))
    }

    /// Decode a digest as a big-endian integer, left-padded to the scalar
    /// width. Longer digests are truncated by the prehash conversion.
    fn prehash(digest: &str) -> Result<Vec<u8>, CryptoError> {
        let bytes = decode_digest(digest)?;
        if bytes.len() >= SCALAR_LEN {
            return Ok(bytes);
        }
        let mut padded = vec![0u8; SCALAR_LEN - bytes.len()];
        padded.extend_from_slice(&bytes);
        Ok(padded)
    }
}

impl SignatureScheme for Secp256k1Ecdsa {
    fn key_type(&self) -> KeyType {
        KeyType::Ecdsa
    }

    fn generate_secret(&self) -> String {
        let key = SigningKey::random(&mut rand::rngs::OsRng);
        hex::encode(key.to_bytes())
    }

    fn derive_public_key(&self, secret: &str) -> Result<String, CryptoError> {
        let key = Self::signing_key(secret)?;
        Ok(hex::encode(key.verifying_key().to_encoded_point(false).as_bytes()))
    }

    fn sign(&self, digest: &str, secret: &str) -> Result<String, CryptoError> {
        let key = Self::signing_key(secret)?;
        let prehash = Self::prehash(digest)?;
        let signature: Signature = key
            .sign_prehash(&prehash)
            .map_err(|e| CryptoError::InvalidInput(format!("digest cannot be signed: {e}")))?;
        Ok(hex::encode(signature.to_der().as_bytes()))
    }

    fn verify(&self, digest: &str, signature: &str, public_key: &str) -> Result<bool, CryptoError> {
        let key = Self::verifying_key(public_key)?;
        let Ok(prehash) = Self::prehash(digest) else {
            debug!("ecdsa verify: digest is not hex");
            return Ok(false);
        };
        let Some(signature) = hex::decode(signature)
            .ok()
            .and_then(|der| Signature::from_der(&der).ok())
        else {
            debug!("ecdsa verify: signature is not DER hex");
            return Ok(false);
        };
        let signature = signature.normalize_s().unwrap_or(signature);
        Ok(key.verify_prehash(&prehash, &signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATOR: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                             483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    fn digest() -> String {
        crate::hasher::NodeHasher::SHA256.hash("message")
    }

    #[test]
    fn secret_one_derives_generator() {
        let scheme = Secp256k1Ecdsa;
        assert_eq!(scheme.derive_public_key("01").unwrap(), GENERATOR);
        assert_eq!(scheme.derive_public_key("1").unwrap(), GENERATOR);
        assert_eq!(
            scheme.derive_public_key(&format!("{:0>64}", "1")).unwrap(),
            GENERATOR
        );
    }

    #[test]
    fn signature_is_der_hex_and_deterministic() {
        let scheme = Secp256k1Ecdsa;
        let secret = scheme.generate_secret();
        let first = scheme.sign(&digest(), &secret).unwrap();
        let second = scheme.sign(&digest(), &secret).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("30"));
        assert_eq!(first, first.to_lowercase());
    }

    #[test]
    fn sign_and_verify() {
        let scheme = Secp256k1Ecdsa;
        let secret = scheme.generate_secret();
        let public = scheme.derive_public_key(&secret).unwrap();
        let sig = scheme.sign(&digest(), &secret).unwrap();
        assert!(scheme.verify(&digest(), &sig, &public).unwrap());
    }

    #[test]
    fn compressed_public_key_is_accepted() {
        let scheme = Secp256k1Ecdsa;
        let secret = scheme.generate_secret();
        let key = Secp256k1Ecdsa::signing_key(&secret).unwrap();
        let compressed = hex::encode(key.verifying_key().to_encoded_point(true).as_bytes());
        let sig = scheme.sign(&digest(), &secret).unwrap();
        assert!(scheme.verify(&digest(), &sig, &compressed).unwrap());
    }

    #[test]
    fn high_s_signature_still_verifies() {
        let scheme = Secp256k1Ecdsa;
        let secret = scheme.generate_secret();
        let public = scheme.derive_public_key(&secret).unwrap();
        let der = hex::decode(scheme.sign(&digest(), &secret).unwrap()).unwrap();
        let low = Signature::from_der(&der).unwrap();
        let r: k256::Scalar = *low.r();
        let s: k256::Scalar = *low.s();
        let high = Signature::from_scalars(r.to_bytes(), (-s).to_bytes()).unwrap();
        let high_hex = hex::encode(high.to_der().as_bytes());
        assert!(scheme.verify(&digest(), &high_hex, &public).unwrap());
    }

    #[test]
    fn wrong_key_fails() {
        let scheme = Secp256k1Ecdsa;
        let sig = scheme.sign(&digest(), &scheme.generate_secret()).unwrap();
        let other = scheme.derive_public_key(&scheme.generate_secret()).unwrap();
        assert!(!scheme.verify(&digest(), &sig, &other).unwrap());
    }

    #[test]
    fn malformed_signature_is_false() {
        let scheme = Secp256k1Ecdsa;
        assert!(!scheme.verify(&digest(), "3044zz", GENERATOR).unwrap());
        assert!(!scheme.verify(&digest(), "deadbeef", GENERATOR).unwrap());
        assert!(!scheme.verify("not hex", "3006020101020101", GENERATOR).unwrap());
    }

    #[test]
    fn malformed_secret_is_error() {
        let scheme = Secp256k1Ecdsa;
        let above_order = "ff".repeat(32);
        let too_long = "01".repeat(33);
        for secret in ["", "xyz", "00", above_order.as_str(), too_long.as_str()] {
            assert!(
                matches!(
                    scheme.derive_public_key(secret),
                    Err(CryptoError::MalformedKeyMaterial { key_type: KeyType::Ecdsa, .. })
                ),
                "secret {secret:?} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_public_key_is_error() {
        let scheme = Secp256k1Ecdsa;
        let sig = scheme.sign(&digest(), "01").unwrap();
        assert!(matches!(
            scheme.verify(&digest(), &sig, "04abcd"),
            Err(CryptoError::MalformedKeyMaterial { .. })
        ));
        assert!(matches!(
            scheme.verify(&digest(), &sig, "not hex"),
            Err(CryptoError::MalformedKeyMaterial { .. })
        ));
    }

    #[test]
    fn non_hex_digest_cannot_be_signed() {
        let scheme = Secp256k1Ecdsa;
        assert!(matches!(scheme.sign("nothex", "01"), Err(CryptoError::InvalidInput(_))));
    }

    #[test]
    fn short_digest_signs_as_padded_integer() {
        let scheme = Secp256k1Ecdsa;
        let short = scheme.sign("abcd", "01").unwrap();
        assert_eq!(short, scheme.sign(&format!("{:0>64}", "abcd"), "01").unwrap());
        assert_eq!(scheme.sign("abc", "01").unwrap(), scheme.sign("0abc", "01").unwrap());
        assert!(scheme.verify("abcd", &short, GENERATOR).unwrap());
        assert!(!scheme.verify("abce", &short, GENERATOR).unwrap());

        let empty = scheme.sign("", "01").unwrap();
        assert!(scheme.verify(&"00".repeat(32), &empty, GENERATOR).unwrap());
    }

    #[test]
    fn verifies_signature_over_padded_short_digest() {
        let key = Secp256k1Ecdsa::signing_key("01").unwrap();
        let mut padded = [0u8; SCALAR_LEN];
        padded[SCALAR_LEN - 2..].copy_from_slice(&[0xab, 0xcd]);
        let signature: Signature = key.sign_prehash(&padded).unwrap();
        let der = hex::encode(signature.to_der().as_bytes());
        assert!(Secp256k1Ecdsa.verify("abcd", &der, GENERATOR).unwrap());
    }
}
