use crate::errors::{LedgerError, LedgerResult};
use crate::types::Key32;

/// Encode a string key into its fixed 32-byte form: UTF-8 bytes
/// right-aligned with zero padding on the left. The result doubles as a
/// deterministic storage-addressing seed, so two distinct keys within the
/// supported length never collide.
pub fn encode_key(key: &str) -> LedgerResult<Key32> {
    let bytes = key.as_bytes();
    if bytes.len() > 32 {
        return Err(LedgerError::KeyTooLong(bytes.len()));
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

/// Reverse of [`encode_key`]: strip the leading zero padding and decode the
/// remaining bytes as UTF-8.
pub fn decode_key(raw: &Key32) -> LedgerResult<String> {
    let start = raw.iter().position(|&b| b != 0).unwrap_or(raw.len());
    String::from_utf8(raw[start..].to_vec())
        .map_err(|_| LedgerError::InvalidValueForKey("key bytes are not valid UTF-8".to_string()))
}
