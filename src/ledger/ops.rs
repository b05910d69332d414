//! Mutating ledger operations.
//!
//! Every operation is a single atomic step: all checks run before the
//! first write, so a failure never leaves a partial mutation behind. The
//! host runtime guarantees callers are who they claim to be; this layer
//! only compares identities.

use tracing::info;

use super::core::{FcdInitPolicy, Ledger};
use crate::codec::{encode_key, encode_positional};
use crate::crypto::merkle;
use crate::errors::{LedgerError, LedgerResult};
use crate::types::{
    AccountId, Authority, Block, Bytes32, FirstClassData, Key32, Status, Value32, VerifyResult,
};

impl Ledger {
    /// Create the Authority and Status singletons. The caller becomes the
    /// owner; Status starts zeroed except for the given padding.
    pub fn initialize(&self, caller: &AccountId, padding: u32) -> LedgerResult<()> {
        if self.storage().contains(&self.authority_address())? {
            return Err(LedgerError::AlreadyInitialized("ledger"));
        }
        self.storage()
            .put(&self.authority_address(), &Authority { owner: *caller })?;
        self.storage().put(
            &self.status_address(),
            &Status {
                padding,
                ..Status::default()
            },
        )?;
        info!(owner = %hex::encode(caller), padding, "ledger initialized");
        Ok(())
    }

    /// Update the proof-depth bound. Owner only.
    pub fn set_padding(&self, caller: &AccountId, padding: u32) -> LedgerResult<()> {
        self.require_owner(caller)?;
        let mut status = self.status()?;
        status.padding = padding;
        self.storage().put(&self.status_address(), &status)?;
        info!(padding, by = %hex::encode(caller), "padding set");
        Ok(())
    }

    /// Publish a new block: its Merkle root plus metadata, at the address
    /// derived from `block_id`. Blocks are append-only and strictly
    /// increasing; Status advances in the same step.
    pub fn submit(
        &self,
        caller: &AccountId,
        block_id: u32,
        root: Bytes32,
        timestamp: u32,
    ) -> LedgerResult<()> {
        self.require_owner(caller)?;
        let mut status = self.status()?;
        if block_id <= status.last_id {
            return Err(LedgerError::CannotSubmitOlderData {
                block_id,
                last_id: status.last_id,
            });
        }
        let seed = encode_positional(block_id as u64);
        let address = self.block_address(&seed);
        if self.storage().contains(&address)? {
            return Err(LedgerError::BlockAlreadyExists(block_id));
        }

        self.storage().put(
            &address,
            &Block {
                block_id,
                root,
                timestamp,
            },
        )?;
        status.last_id = block_id;
        status.last_data_timestamp = timestamp;
        status.next_block_id = block_id + 1;
        self.storage().put(&self.status_address(), &status)?;
        info!(block_id, timestamp, by = %hex::encode(caller), "block submitted");
        Ok(())
    }

    /// Hand the ledger to a new owner. Requires the current owner as caller
    /// and the new owner among the authenticated signers of the call, so
    /// ownership can never move unilaterally to an uncontrolled identity.
    pub fn transfer_ownership(
        &self,
        caller: &AccountId,
        new_owner: &AccountId,
        signers: &[AccountId],
    ) -> LedgerResult<()> {
        self.require_owner(caller)?;
        if !signers.contains(new_owner) {
            return Err(LedgerError::MissingAuthorization);
        }
        self.storage()
            .put(&self.authority_address(), &Authority { owner: *new_owner })?;
        info!(
            from = %hex::encode(caller),
            to = %hex::encode(new_owner),
            "ownership changed"
        );
        Ok(())
    }

    /// Create a first class data entry. Create-only: an occupied slot
    /// fails. Authorization follows the configured [`FcdInitPolicy`].
    pub fn initialize_first_class_data(
        &self,
        caller: &AccountId,
        key: &str,
        value: Value32,
        timestamp: u32,
    ) -> LedgerResult<()> {
        let seed = encode_key(key)?;
        if self.fcd_init_policy() == FcdInitPolicy::OwnerOnly {
            self.require_owner(caller)?;
        }
        let address = self.fcd_address(&seed);
        if self.storage().contains(&address)? {
            return Err(LedgerError::AlreadyInitialized("first class data"));
        }
        self.storage().put(
            &address,
            &FirstClassData {
                key: key.to_string(),
                value,
                timestamp,
            },
        )?;
        info!(key, by = %hex::encode(caller), "first class data initialized");
        Ok(())
    }

    /// Overwrite an existing first class data entry. Owner only; the entry
    /// must already exist. Most recent write wins: no timestamp ordering is
    /// enforced between successive updates (observed oracle behavior,
    /// deliberately not "fixed" here).
    pub fn update_first_class_data(
        &self,
        caller: &AccountId,
        key: &str,
        value: Value32,
        timestamp: u32,
    ) -> LedgerResult<()> {
        let seed = encode_key(key)?;
        let address = self.fcd_address(&seed);
        if !self.storage().contains(&address)? {
            return Err(LedgerError::NotFound("first class data"));
        }
        self.require_owner(caller)?;
        self.storage().put(
            &address,
            &FirstClassData {
                key: key.to_string(),
                value,
                timestamp,
            },
        )?;
        info!(key, timestamp, by = %hex::encode(caller), "first class data updated");
        Ok(())
    }

    /// Create the caller's verification scratch slot. Create-only; every
    /// later verification overwrites it in place.
    pub fn initialize_verify_result(&self, caller: &AccountId) -> LedgerResult<()> {
        let address = self.verify_result_address(caller);
        if self.storage().contains(&address)? {
            return Err(LedgerError::AlreadyInitialized("verify result"));
        }
        self.storage().put(&address, &VerifyResult::default())?;
        info!(caller = %hex::encode(caller), "verify result slot initialized");
        Ok(())
    }

    /// Check a (key, value, proof) triple against the block addressed by
    /// `block_seed` and record the boolean outcome in the caller's
    /// VerifyResult slot.
    ///
    /// "Not included" is a valid outcome, not an error: only a missing
    /// block, a missing result slot, or a proof deeper than the configured
    /// padding fail hard.
    pub fn verify_proof_for_block(
        &self,
        caller: &AccountId,
        block_seed: &Value32,
        proof: &[Bytes32],
        key: &Key32,
        value: &Value32,
    ) -> LedgerResult<bool> {
        let status = self.status()?;
        if proof.len() > status.padding as usize {
            return Err(LedgerError::MalformedProof(format!(
                "proof depth {} exceeds padding {}",
                proof.len(),
                status.padding
            )));
        }
        let block = self.block_by_seed(block_seed)?;
        let result_address = self.verify_result_address(caller);
        if !self.storage().contains(&result_address)? {
            return Err(LedgerError::NotFound("verify result"));
        }

        let result = merkle::verify_proof(&block.root, proof, key, value);
        self.storage().put(&result_address, &VerifyResult { result })?;
        info!(
            block_id = block.block_id,
            result,
            caller = %hex::encode(caller),
            "proof verified"
        );
        Ok(result)
    }
}
