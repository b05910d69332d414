use ::rootledger::codec::{encode_key, encode_positional, encode_value, LeafValue};
use ::rootledger::crypto::MerkleTree;
use ::rootledger::ledger::{FcdInitPolicy, Ledger};
use ::rootledger::storage::Storage;
use ::rootledger::types::{AccountId, Bytes32, Key32, Value32};
use ::rootledger::LedgerError;
use anyhow::Result;
use tempfile::TempDir;

// ===== Test Helper Functions =====

fn test_account(id: u8) -> AccountId {
    let mut account = [0u8; 32];
    account[0] = id;
    account
}

const OWNER: u8 = 1;
const CONSUMER: u8 = 4;
const BLOCK_ID: u32 = 343062;
const TIMESTAMP: u32 = 1647469325;

fn encoded_leaf(key: &str, value: &str) -> Result<(Key32, Value32)> {
    Ok((
        encode_key(key)?,
        encode_value(&LeafValue::Decimal(value.into()), key)?,
    ))
}

/// Build a dataset tree the way an off-chain producer would and return the
/// leaves alongside it.
fn test_dataset() -> Result<(MerkleTree, Vec<(Key32, Value32)>)> {
    let mut tree = MerkleTree::new();
    let mut leaves = Vec::new();
    for (key, value) in [
        ("ETH-USD", "3001.23"),
        ("BTC-USD", "45000.5"),
        ("UMB-USD", "0.04337673"),
        ("DOGE-USD", "0.08"),
        ("ADA-USD", "1.19"),
    ] {
        let (k, v) = encoded_leaf(key, value)?;
        tree.add_leaf(&k, &v);
        leaves.push((k, v));
    }
    Ok((tree, leaves))
}

/// Ledger with one published block holding the dataset root, plus an
/// initialized result slot for the consumer.
fn ledger_with_block(dir: &TempDir, root: Bytes32, padding: u32) -> Result<Ledger> {
    let storage = Storage::open(dir.path().to_str().unwrap())?;
    let ledger = Ledger::new(storage, test_account(0xCC), FcdInitPolicy::OwnerOnly);
    ledger.initialize(&test_account(OWNER), padding)?;
    ledger.submit(&test_account(OWNER), BLOCK_ID, root, TIMESTAMP)?;
    ledger.initialize_verify_result(&test_account(CONSUMER))?;
    Ok(ledger)
}

fn block_seed() -> Value32 {
    encode_positional(BLOCK_ID as u64)
}

// ===== Unit Tests =====

#[test]
fn test_valid_proof_verifies_true() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (tree, leaves) = test_dataset()?;
    let ledger = ledger_with_block(&dir, tree.root(), 64)?;
    let consumer = test_account(CONSUMER);

    for (i, (key, value)) in leaves.iter().enumerate() {
        let proof = tree.generate_proof(i)?;
        let result = ledger.verify_proof_for_block(&consumer, &block_seed(), &proof, key, value)?;
        assert!(result, "leaf {i}");
        assert!(ledger.verify_result(&consumer)?.result);
    }
    Ok(())
}

#[test]
fn test_tampered_proof_element_verifies_false() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (tree, leaves) = test_dataset()?;
    let ledger = ledger_with_block(&dir, tree.root(), 64)?;
    let consumer = test_account(CONSUMER);

    let (key, value) = &leaves[0];
    let mut proof = tree.generate_proof(0)?;
    proof[1][0] ^= 0xde;

    let result = ledger.verify_proof_for_block(&consumer, &block_seed(), &proof, key, value)?;
    assert!(!result);
    assert!(!ledger.verify_result(&consumer)?.result);
    Ok(())
}

#[test]
fn test_tampered_key_verifies_false() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (tree, leaves) = test_dataset()?;
    let ledger = ledger_with_block(&dir, tree.root(), 64)?;
    let consumer = test_account(CONSUMER);

    let (key, value) = &leaves[0];
    let proof = tree.generate_proof(0)?;
    let mut tampered_key = *key;
    tampered_key[31] ^= 1;

    let result =
        ledger.verify_proof_for_block(&consumer, &block_seed(), &proof, &tampered_key, value)?;
    assert!(!result);
    Ok(())
}

#[test]
fn test_tampered_value_verifies_false() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (tree, leaves) = test_dataset()?;
    let ledger = ledger_with_block(&dir, tree.root(), 64)?;
    let consumer = test_account(CONSUMER);

    let (key, value) = &leaves[0];
    let proof = tree.generate_proof(0)?;
    // one cent more than the published price
    let tampered_value = encode_value(&LeafValue::Decimal("3001.24".into()), "ETH-USD")?;
    assert_ne!(&tampered_value, value);

    let result =
        ledger.verify_proof_for_block(&consumer, &block_seed(), &proof, key, &tampered_value)?;
    assert!(!result);
    Ok(())
}

#[test]
fn test_result_slot_tracks_latest_outcome() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (tree, leaves) = test_dataset()?;
    let ledger = ledger_with_block(&dir, tree.root(), 64)?;
    let consumer = test_account(CONSUMER);

    let (key, value) = &leaves[0];
    let proof = tree.generate_proof(0)?;

    assert!(ledger.verify_proof_for_block(&consumer, &block_seed(), &proof, key, value)?);
    assert!(ledger.verify_result(&consumer)?.result);

    let mut bad_proof = proof.clone();
    bad_proof[0][0] ^= 1;
    assert!(!ledger.verify_proof_for_block(&consumer, &block_seed(), &bad_proof, key, value)?);
    assert!(!ledger.verify_result(&consumer)?.result);
    Ok(())
}

#[test]
fn test_unknown_block_is_not_found() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (tree, leaves) = test_dataset()?;
    let ledger = ledger_with_block(&dir, tree.root(), 64)?;
    let consumer = test_account(CONSUMER);

    let (key, value) = &leaves[0];
    let proof = tree.generate_proof(0)?;
    let missing_seed = encode_positional(999_999);

    assert!(matches!(
        ledger.verify_proof_for_block(&consumer, &missing_seed, &proof, key, value),
        Err(LedgerError::NotFound("block"))
    ));
    Ok(())
}

#[test]
fn test_missing_result_slot_is_not_found() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (tree, leaves) = test_dataset()?;
    let ledger = ledger_with_block(&dir, tree.root(), 64)?;
    let uninitialized_caller = test_account(9);

    let (key, value) = &leaves[0];
    let proof = tree.generate_proof(0)?;

    assert!(matches!(
        ledger.verify_proof_for_block(&uninitialized_caller, &block_seed(), &proof, key, value),
        Err(LedgerError::NotFound("verify result"))
    ));
    Ok(())
}

#[test]
fn test_proof_deeper_than_padding_is_malformed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (tree, leaves) = test_dataset()?;
    // padding of 1 cannot admit the 3-element proofs of a 5-leaf tree
    let ledger = ledger_with_block(&dir, tree.root(), 1)?;
    let consumer = test_account(CONSUMER);

    let (key, value) = &leaves[0];
    let proof = tree.generate_proof(0)?;
    assert!(proof.len() > 1);

    assert!(matches!(
        ledger.verify_proof_for_block(&consumer, &block_seed(), &proof, key, value),
        Err(LedgerError::MalformedProof(_))
    ));
    Ok(())
}

#[test]
fn test_proof_against_wrong_block_verifies_false() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (tree, leaves) = test_dataset()?;
    let ledger = ledger_with_block(&dir, tree.root(), 64)?;
    let consumer = test_account(CONSUMER);

    // a later block with a different dataset root
    let mut other_tree = MerkleTree::new();
    let (k, v) = encoded_leaf("ETH-USD", "2999.99")?;
    other_tree.add_leaf(&k, &v);
    ledger.submit(&test_account(OWNER), BLOCK_ID + 1, other_tree.root(), TIMESTAMP + 60)?;

    let (key, value) = &leaves[0];
    let proof = tree.generate_proof(0)?;
    let other_seed = encode_positional((BLOCK_ID + 1) as u64);

    let result = ledger.verify_proof_for_block(&consumer, &other_seed, &proof, key, value)?;
    assert!(!result);
    Ok(())
}
