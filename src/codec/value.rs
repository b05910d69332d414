use num_bigint::BigUint;

use super::{classify, KeyClass};
use crate::errors::{LedgerError, LedgerResult};
use crate::types::Value32;

/// Number of fractional decimal digits preserved by the scaled encoding.
/// Constant across the whole system: every producer and consumer of scaled
/// leaves multiplies/divides by `10^SCALE_DECIMALS`.
pub const SCALE_DECIMALS: usize = 18;

/// A leaf value before encoding. The variant must match the class of the
/// key it is encoded under, otherwise `InvalidValueForKey`.
///
/// Numeric values are carried as decimal strings, never floats: encoding is
/// exact or it fails, there is no silent rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafValue {
    /// Raw unsigned integer for positional (empty-key) leaves.
    Unsigned(u64),
    /// Unscaled arbitrary-precision integer, as a decimal digit string.
    Integer(String),
    /// Decimal number, scaled by `10^SCALE_DECIMALS` on encode.
    Decimal(String),
}

fn scale_factor() -> BigUint {
    BigUint::from(10u32).pow(SCALE_DECIMALS as u32)
}

fn biguint_to_bytes32(n: &BigUint, what: &str) -> LedgerResult<Value32> {
    let raw = n.to_bytes_be();
    if raw.len() > 32 {
        return Err(LedgerError::PrecisionLoss(format!(
            "{what} does not fit in 256 bits"
        )));
    }
    let mut out = [0u8; 32];
    out[32 - raw.len()..].copy_from_slice(&raw);
    Ok(out)
}

fn parse_digits(s: &str) -> LedgerResult<BigUint> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::InvalidValueForKey(format!(
            "expected unsigned decimal digits, got {s:?}"
        )));
    }
    // parse_bytes cannot fail after the digit check above
    BigUint::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| LedgerError::InvalidValueForKey(format!("unparseable digits {s:?}")))
}

/// Parse a decimal string (`"3001.23"`, `"0.04337673"`, `"12"`) into the
/// scaled integer `value * 10^SCALE_DECIMALS`. Fractional digits beyond the
/// scale are rejected, not rounded.
fn parse_scaled(s: &str) -> LedgerResult<BigUint> {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    let int = parse_digits(int_part)?;
    let frac_trimmed = frac_part.trim_end_matches('0');
    if frac_trimmed.is_empty() {
        if !frac_part.is_empty() {
            // all-zero fraction like "1.00" still has to be digits
            parse_digits(frac_part)?;
        }
        return Ok(int * scale_factor());
    }
    if frac_trimmed.len() > SCALE_DECIMALS {
        return Err(LedgerError::PrecisionLoss(format!(
            "{s:?} has more than {SCALE_DECIMALS} fractional digits"
        )));
    }
    let frac = parse_digits(frac_trimmed)?;
    let shift = BigUint::from(10u32).pow((SCALE_DECIMALS - frac_trimmed.len()) as u32);
    Ok(int * scale_factor() + frac * shift)
}

/// Render a scaled integer back to its canonical decimal string: no
/// trailing fractional zeros, no trailing dot.
fn format_scaled(n: &BigUint) -> String {
    let scale = scale_factor();
    let int = n / &scale;
    let rem = n % &scale;
    if rem == BigUint::from(0u32) {
        return int.to_str_radix(10);
    }
    let frac = format!("{:0>width$}", rem.to_str_radix(10), width = SCALE_DECIMALS);
    format!("{}.{}", int.to_str_radix(10), frac.trim_end_matches('0'))
}

/// Encode a positional (blockId-style) integer into 32 big-endian bytes.
/// Infallible; also used as the deterministic address seed for blocks.
pub fn encode_positional(n: u64) -> Value32 {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&n.to_be_bytes());
    out
}

/// Encode a leaf value into exactly 32 bytes under the given key's class.
pub fn encode_value(value: &LeafValue, key: &str) -> LedgerResult<Value32> {
    match (classify(key), value) {
        (KeyClass::Positional, LeafValue::Unsigned(n)) => Ok(encode_positional(*n)),
        (KeyClass::FixedPrecision, LeafValue::Integer(s)) => {
            let n = parse_digits(s)?;
            biguint_to_bytes32(&n, "fixed-precision integer")
        }
        (KeyClass::Scaled, LeafValue::Decimal(s)) => {
            let n = parse_scaled(s)?;
            biguint_to_bytes32(&n, "scaled decimal")
        }
        (class, other) => Err(LedgerError::InvalidValueForKey(format!(
            "{other:?} does not match {class:?} key {key:?}"
        ))),
    }
}

/// Decode 32 bytes back into the leaf value for the given key's class.
/// Numeric strings come back in canonical form (no leading zeros in the
/// integer part, no trailing fractional zeros).
pub fn decode_value(raw: &Value32, key: &str) -> LedgerResult<LeafValue> {
    match classify(key) {
        KeyClass::Positional => {
            if raw[..24].iter().any(|&b| b != 0) {
                return Err(LedgerError::InvalidValueForKey(
                    "positional value exceeds the u64 range".to_string(),
                ));
            }
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&raw[24..]);
            Ok(LeafValue::Unsigned(u64::from_be_bytes(buf)))
        }
        KeyClass::FixedPrecision => {
            let n = BigUint::from_bytes_be(raw);
            Ok(LeafValue::Integer(n.to_str_radix(10)))
        }
        KeyClass::Scaled => {
            let n = BigUint::from_bytes_be(raw);
            Ok(LeafValue::Decimal(format_scaled(&n)))
        }
    }
}
