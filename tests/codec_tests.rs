use ::rootledger::codec::{decode_key, decode_value, encode_key, encode_value};
use ::rootledger::types::{bytes32_from_hex, bytes32_to_hex};
use ::rootledger::{classify, KeyClass, LeafValue, LedgerError};
use anyhow::Result;

// ===== Unit Tests =====

#[test]
fn test_key_round_trip_across_realistic_names() -> Result<()> {
    let test_cases = ["Chain", "Staking", "ETH-USD", "UMB-USD", "FIXED_SUPPLY"];
    for key in test_cases {
        let encoded = encode_key(key)?;
        assert_eq!(decode_key(&encoded)?, key, "key {key}");
    }
    Ok(())
}

#[test]
fn test_key_longer_than_width_is_rejected() {
    let key = "ThisIsDefinitelyAMuchLongerNameThanThePreviousExampleButWontBeTheLongest";
    assert!(matches!(
        encode_key(key),
        Err(LedgerError::KeyTooLong(n)) if n == key.len()
    ));
}

#[test]
fn test_value_round_trip_per_class() -> Result<()> {
    // scaled price-like values
    for v in ["3001.23", "0.04337673", "45000.5", "1", "0"] {
        let value = LeafValue::Decimal(v.to_string());
        let raw = encode_value(&value, "ETH-USD")?;
        assert_eq!(decode_value(&raw, "ETH-USD")?, value, "scaled {v}");
    }

    // fixed-precision unscaled integers
    for v in ["0", "42", "115792089237316195423570985008687907853269984665640564039457"] {
        let value = LeafValue::Integer(v.to_string());
        let raw = encode_value(&value, "FIXED_TOTAL")?;
        assert_eq!(decode_value(&raw, "FIXED_TOTAL")?, value, "fixed {v}");
    }

    // positional block ids
    for v in [0u64, 1, 343062, u64::MAX] {
        let value = LeafValue::Unsigned(v);
        let raw = encode_value(&value, "")?;
        assert_eq!(decode_value(&raw, "")?, value, "positional {v}");
    }
    Ok(())
}

#[test]
fn test_class_dispatch_is_keyed_on_name() {
    assert_eq!(classify(""), KeyClass::Positional);
    assert_eq!(classify("FIXED_ANYTHING"), KeyClass::FixedPrecision);
    assert_eq!(classify("ETH-USD"), KeyClass::Scaled);
}

#[test]
fn test_precision_loss_is_loud() {
    // more fractional digits than the scale preserves
    assert!(matches!(
        encode_value(&LeafValue::Decimal("1.0000000000000000001".into()), "ETH-USD"),
        Err(LedgerError::PrecisionLoss(_))
    ));
    // fixed integer beyond 256 bits
    let over = "9".repeat(80);
    assert!(matches!(
        encode_value(&LeafValue::Integer(over), "FIXED_TOTAL"),
        Err(LedgerError::PrecisionLoss(_))
    ));
}

#[test]
fn test_value_shape_must_match_key_class() {
    assert!(matches!(
        encode_value(&LeafValue::Unsigned(7), "ETH-USD"),
        Err(LedgerError::InvalidValueForKey(_))
    ));
    assert!(matches!(
        encode_value(&LeafValue::Decimal("1.0".into()), ""),
        Err(LedgerError::InvalidValueForKey(_))
    ));
    assert!(matches!(
        encode_value(&LeafValue::Integer("7".into()), "ETH-USD"),
        Err(LedgerError::InvalidValueForKey(_))
    ));
}

#[test]
fn test_root_hex_interop() -> Result<()> {
    let root = "0x1786dd07dffc4abfe4fb2bb007dd4fdf93a690e185142a14af877654625066ac";
    let decoded = bytes32_from_hex(root)?;
    assert_eq!(bytes32_to_hex(&decoded), root);
    Ok(())
}

#[test]
fn test_short_hex_root_is_malformed() {
    assert!(matches!(
        bytes32_from_hex("0x1786dd07"),
        Err(LedgerError::MalformedProof(_))
    ));
}
