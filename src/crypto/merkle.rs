use sha3::{Digest, Keccak256};

use crate::errors::{LedgerError, LedgerResult};
use crate::types::{Bytes32, Key32, Value32};

fn keccak256(parts: &[&[u8]]) -> Bytes32 {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Leaf digest: `keccak256(key || value)` over the two 32-byte buffers.
pub fn hash_leaf(key: &Key32, value: &Value32) -> Bytes32 {
    keccak256(&[key, value])
}

/// Canonical ordering pairing: the two digests are hashed in ascending
/// bytewise order, never positional left/right. Verification is therefore
/// independent of whether the leaf was a left or right child at each level,
/// matching the convention of the off-chain tree builder.
pub fn hash_pair(a: &Bytes32, b: &Bytes32) -> Bytes32 {
    if a <= b {
        keccak256(&[a, b])
    } else {
        keccak256(&[b, a])
    }
}

/// Fold an ordered proof over a leaf digest, yielding the implied root.
pub fn compute_root(leaf: &Bytes32, proof: &[Bytes32]) -> Bytes32 {
    proof.iter().fold(*leaf, |acc, sibling| hash_pair(&acc, sibling))
}

/// Decide whether the (key, value) leaf is included under `root` given the
/// ordered sibling digests in `proof`.
///
/// Pure and side-effect free. For well-formed input the outcome is always a
/// plain boolean: a mismatching root means "not included", never an error.
pub fn verify_proof(root: &Bytes32, proof: &[Bytes32], key: &Key32, value: &Value32) -> bool {
    compute_root(&hash_leaf(key, value), proof) == *root
}

/// Reference sorted-pair Merkle tree builder.
///
/// Shares `hash_leaf`/`hash_pair` with the verifier so proofs it generates
/// fold back to its root under the exact same convention. An odd node at
/// any level is promoted unchanged to the next level.
pub struct MerkleTree {
    leaves: Vec<Bytes32>,
}

impl MerkleTree {
    pub fn new() -> Self {
        Self { leaves: Vec::new() }
    }

    /// Append a (key, value) leaf. Order of insertion fixes leaf indices.
    pub fn add_leaf(&mut self, key: &Key32, value: &Value32) {
        self.leaves.push(hash_leaf(key, value));
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Root over all inserted leaves; all-zero for an empty tree.
    pub fn root(&self) -> Bytes32 {
        if self.leaves.is_empty() {
            return [0u8; 32];
        }
        let mut level = self.leaves.clone();
        while level.len() > 1 {
            level = Self::next_level(&level);
        }
        level[0]
    }

    /// Ordered sibling digests proving inclusion of the leaf at `index`.
    pub fn generate_proof(&self, index: usize) -> LedgerResult<Vec<Bytes32>> {
        if index >= self.leaves.len() {
            return Err(LedgerError::MalformedProof(format!(
                "leaf index {index} out of bounds ({} leaves)",
                self.leaves.len()
            )));
        }
        let mut proof = Vec::new();
        let mut level = self.leaves.clone();
        let mut pos = index;
        while level.len() > 1 {
            let sibling = if pos % 2 == 0 { pos + 1 } else { pos - 1 };
            if sibling < level.len() {
                proof.push(level[sibling]);
            }
            level = Self::next_level(&level);
            pos /= 2;
        }
        Ok(proof)
    }

    fn next_level(level: &[Bytes32]) -> Vec<Bytes32> {
        level
            .chunks(2)
            .map(|chunk| {
                if chunk.len() == 2 {
                    hash_pair(&chunk[0], &chunk[1])
                } else {
                    chunk[0]
                }
            })
            .collect()
    }
}

impl Default for MerkleTree {
    fn default() -> Self {
        Self::new()
    }
}
