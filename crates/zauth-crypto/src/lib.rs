//! Cryptographic primitives for zauth.
//!
//! Provides string-level hashing, an ordered Merkle commitment over property
//! values (with inclusion proofs), and a key-type dispatched signature
//! provider covering ECDSA/secp256k1 and EdDSA/ed25519.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod config;
pub mod ecdsa;
pub mod eddsa;
pub mod error;
pub mod hasher;
pub mod merkle;
pub mod provider;
pub mod scheme;

pub use config::MerkleConfig;
pub use error::CryptoError;
pub use hasher::{HashAlgorithm, NodeHasher};
pub use merkle::{MerkleCommitment, MerkleProof, MerkleTree, ProofStep, Side};
pub use provider::{derive_public_key, generate_secret, sign, verify, SignatureProvider};
pub use scheme::SignatureScheme;
pub use zauth_types::KeyType;
