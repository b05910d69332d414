//! Hashing primitives: deterministic slot addressing and the Merkle
//! inclusion-proof machinery.

pub mod merkle;

pub use merkle::{compute_root, hash_leaf, hash_pair, verify_proof, MerkleTree};

use sha3::{Digest, Keccak256};

use crate::types::{AccountId, Bytes32};

const ADDRESS_DOMAIN: &[u8] = b"rootledger:slot";

/// Deterministic storage-addressing primitive: map an ordered list of seed
/// buffers plus the owning component identity to a 32-byte slot address.
///
/// Seeds are length-prefixed before hashing so `["ab", "c"]` and
/// `["a", "bc"]` derive different addresses.
pub fn derive_address(seeds: &[&[u8]], component: &AccountId) -> Bytes32 {
    let mut hasher = Keccak256::new();
    hasher.update(ADDRESS_DOMAIN);
    for seed in seeds {
        hasher.update((seed.len() as u32).to_be_bytes());
        hasher.update(seed);
    }
    hasher.update(component);
    hasher.finalize().into()
}
