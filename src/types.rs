use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

/// Fixed-size types used across the system.
pub type Key32 = [u8; 32];
pub type Value32 = [u8; 32];
pub type Bytes32 = [u8; 32];

/// Identity handle for a signer or a deployed component, as authenticated
/// by the host runtime. This core never verifies signatures itself, it only
/// compares identities.
pub type AccountId = [u8; 32];

/// Singleton holding the identity allowed to submit blocks, set parameters
/// and write first class data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub owner: AccountId,
}

/// Singleton ledger status, updated on every successful submission.
///
/// Invariant: `next_block_id == last_id + 1` after any successful submit,
/// and `last_id` is non-decreasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Bound on accepted proof depth for verification.
    pub padding: u32,
    /// Highest submitted block identifier.
    pub last_id: u32,
    /// Timestamp carried by the last submission.
    pub last_data_timestamp: u32,
    /// Monotonic counter, always `last_id + 1` after a submit.
    pub next_block_id: u32,
}

/// One published dataset: its Merkle root plus metadata.
///
/// Immutable once created; blocks are append-only and never destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub block_id: u32,
    pub root: Bytes32,
    pub timestamp: u32,
}

/// A hot key mirrored directly into addressable storage so consumers can
/// read it without an inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstClassData {
    pub key: String,
    pub value: Value32,
    pub timestamp: u32,
}

/// Per-caller scratch slot holding the outcome of the latest verification.
/// No history is retained, last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    pub result: bool,
}

/// Parse a `0x`-prefixed (or bare) 64-hex-char string into 32 bytes.
///
/// Roots and proof elements are exchanged with off-chain producers in this
/// textual form; anything of the wrong length is a hard error, never a
/// silently truncated buffer.
pub fn bytes32_from_hex(s: &str) -> LedgerResult<Bytes32> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let raw = hex::decode(stripped)
        .map_err(|e| LedgerError::MalformedProof(format!("invalid hex: {e}")))?;
    Bytes32::try_from(raw.as_slice())
        .map_err(|_| LedgerError::MalformedProof(format!("expected 32 bytes, got {}", raw.len())))
}

/// Render 32 bytes as a `0x`-prefixed lowercase hex string.
pub fn bytes32_to_hex(b: &Bytes32) -> String {
    format!("0x{}", hex::encode(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let s = "0x1786dd07dffc4abfe4fb2bb007dd4fdf93a690e185142a14af877654625066ac";
        let b = bytes32_from_hex(s).unwrap();
        assert_eq!(bytes32_to_hex(&b), s);
    }

    #[test]
    fn hex_without_prefix() {
        let s = "1786dd07dffc4abfe4fb2bb007dd4fdf93a690e185142a14af877654625066ac";
        assert!(bytes32_from_hex(s).is_ok());
    }

    #[test]
    fn hex_wrong_length_rejected() {
        assert!(matches!(
            bytes32_from_hex("0xabcd"),
            Err(LedgerError::MalformedProof(_))
        ));
        assert!(matches!(
            bytes32_from_hex("0xzz86dd07dffc4abfe4fb2bb007dd4fdf93a690e185142a14af877654625066ac"),
            Err(LedgerError::MalformedProof(_))
        ));
    }
}
