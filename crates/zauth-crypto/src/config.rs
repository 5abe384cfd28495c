use serde::{Deserialize, Serialize};

use crate::hasher::{HashAlgorithm, NodeHasher};

/// Configuration for Merkle commitments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MerkleConfig {
    /// Hash used to combine sibling nodes.
    pub hash: HashAlgorithm,
}

impl MerkleConfig {
    pub fn hasher(&self) -> NodeHasher {
        NodeHasher::new(self.hash)
    }
}
