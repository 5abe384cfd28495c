use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MerkleConfig;
use crate::error::CryptoError;
use crate::hasher::NodeHasher;

/// Ordered Merkle commitment over string leaves.
///
/// Each level is built by hashing adjacent pairs left to right as
/// `hash(left + right)`. When a level has odd length its last node moves up
/// to the next level unhashed. A single node is the root, so a one-leaf
/// commitment is the leaf itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MerkleCommitment {
    hasher: NodeHasher,
}

impl MerkleCommitment {
    pub const fn new(hasher: NodeHasher) -> Self {
        Self { hasher }
    }

    pub fn from_config(config: &MerkleConfig) -> Self {
        Self::new(config.hasher())
    }

    /// Compute the root of an ordered, non-empty leaf sequence.
    pub fn compute_root<S: AsRef<str>>(&self, leaves: &[S]) -> Result<String, CryptoError> {
        let mut level: Vec<String> = leaves.iter().map(|l| l.as_ref().to_owned()).collect();
        let mut height = 0usize;
        while level.len() > 1 {
            level = next_level(&self.hasher, &level);
            height += 1;
        }
        let root = level.pop().ok_or_else(empty_leaves)?;
        debug!(leaves = leaves.len(), height, algorithm = %self.hasher.algorithm(), "computed merkle root");
        Ok(root)
    }

    pub fn hasher(&self) -> NodeHasher {
        self.hasher
    }
}

/// Side of a sibling in a Merkle proof path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Merkle tree that keeps every level, for inclusion proofs.
///
/// Built with the same pairing and odd-carry rule as [`MerkleCommitment`],
/// so `tree.root()` always equals `compute_root` over the same leaves.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    hasher: NodeHasher,
    /// Level 0 = leaves, last level = `[root]`.
    levels: Vec<Vec<String>>,
}

impl MerkleTree {
    /// Build a tree from ordered leaves. Fails on an empty sequence.
    pub fn from_leaves<S: AsRef<str>>(leaves: &[S], hasher: NodeHasher) -> Result<Self, CryptoError> {
        if leaves.is_empty() {
            return Err(empty_leaves());
        }

        let mut levels: Vec<Vec<String>> =
            vec![leaves.iter().map(|l| l.as_ref().to_owned()).collect()];
        loop {
            let current = &levels[levels.len() - 1];
            if current.len() <= 1 {
                break;
            }
            let next = next_level(&hasher, current);
            levels.push(next);
        }

        Ok(Self { hasher, levels })
    }

    /// The root node.
    pub fn root(&self) -> &str {
        &self.levels[self.levels.len() - 1][0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaves.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn levels(&self) -> &[Vec<String>] {
        &self.levels
    }

    /// The hasher the tree was built with; proofs verify against it.
    pub fn hasher(&self) -> NodeHasher {
        self.hasher
    }

    /// Generate an inclusion proof for the leaf at `index`.
    ///
    /// A level where the node is the carried odd tail has no sibling and
    /// adds no step to the path.
    pub fn proof(&self, index: usize) -> Result<MerkleProof, CryptoError> {
        if index >= self.leaf_count() {
            return Err(CryptoError::InvalidInput(format!(
                "leaf index {index} out of range for {} leaves",
                self.leaf_count()
            )));
        }

        let mut path = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = idx ^ 1;
            if let Some(sibling) = level.get(sibling_idx) {
                let side = if idx % 2 == 0 { Side::Right } else { Side::Left };
                path.push(ProofStep {
                    sibling: sibling.clone(),
                    side,
                });
            }
            idx /= 2;
        }

        Ok(MerkleProof {
            leaf: self.levels[0][index].clone(),
            path,
            root: self.root().to_owned(),
        })
    }
}

/// One step of an inclusion proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling: String,
    pub side: Side,
}

/// Merkle inclusion proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// The leaf being proven.
    pub leaf: String,
    /// Siblings from leaf to root.
    pub path: Vec<ProofStep>,
    /// Expected root.
    pub root: String,
}

impl MerkleProof {
    /// Recompute the root from the leaf and path and compare.
    pub fn verify(&self, hasher: &NodeHasher) -> bool {
        let mut current = self.leaf.clone();
        for step in &self.path {
            current = match step.side {
                Side::Left => hasher.hash_pair(&step.sibling, &current),
                Side::Right => hasher.hash_pair(&current, &step.sibling),
            };
        }
        current == self.root
    }
}

fn next_level(hasher: &NodeHasher, level: &[String]) -> Vec<String> {
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    for pair in level.chunks(2) {
        match pair {
            [left, right] => next.push(hasher.hash_pair(left, right)),
            // Odd tail: carried up unhashed.
            [odd] => next.push(odd.clone()),
            _ => {}
        }
    }
    next
}

fn empty_leaves() -> CryptoError {
    CryptoError::InvalidInput("cannot commit to an empty leaf sequence".into())
}
