use zauth_types::{KeyType, TypeError};

/// Errors from commitment and signing operations.
///
/// A signature that is well-formed but does not check out is not an error;
/// verification reports it as `Ok(false)`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("malformed {key_type} key material: {reason}")]
    MalformedKeyMaterial { key_type: KeyType, reason: String },
}

impl CryptoError {
    pub(crate) fn malformed(key_type: KeyType, reason: impl Into<String>) -> Self {
        Self::MalformedKeyMaterial {
            key_type,
            reason: reason.into(),
        }
    }
}

impl From<TypeError> for CryptoError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::UnsupportedKeyType(tag) => Self::UnsupportedKeyType(tag),
        }
    }
}
