//! Leaf codec: deterministic, fixed-width encoding of leaf keys and the
//! three classes of leaf values the oracle carries.
//!
//! The class of a leaf is decided by its key's naming convention, once, via
//! [`classify`]; every encode/decode path switches on the resulting tag
//! instead of sniffing string prefixes at call sites.

pub mod key;
pub mod value;

pub use key::{decode_key, encode_key};
pub use value::{decode_value, encode_positional, encode_value, LeafValue, SCALE_DECIMALS};

/// Key prefix marking arbitrary-precision unscaled integer values.
pub const FIXED_PREFIX: &str = "FIXED_";

/// The three leaf value classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Empty key: the value is a raw unsigned integer (e.g. a block id
    /// used as an address seed), stored big-endian with no scaling.
    Positional,
    /// `FIXED_`-prefixed key: the value is an unscaled arbitrary-precision
    /// integer carried as a decimal digit string.
    FixedPrecision,
    /// Any other key: a price-like decimal, scaled by `10^SCALE_DECIMALS`.
    Scaled,
}

/// Classify a leaf key. Pure, total, and the single source of truth for
/// which encoding branch a key takes.
pub fn classify(key: &str) -> KeyClass {
    if key.is_empty() {
        KeyClass::Positional
    } else if key.starts_with(FIXED_PREFIX) {
        KeyClass::FixedPrecision
    } else {
        KeyClass::Scaled
    }
}
