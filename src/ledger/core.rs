//! Ledger struct, slot addressing and reads - no mutation here.

use crate::codec::{encode_key, encode_positional};
use crate::crypto::derive_address;
use crate::errors::{LedgerError, LedgerResult};
use crate::storage::Storage;
use crate::types::{
    AccountId, Authority, Block, Bytes32, FirstClassData, Status, Value32, VerifyResult,
};

const AUTHORITY_SEED: &[u8] = b"authority";
const STATUS_SEED: &[u8] = b"status";
const VERIFY_RESULT_SEED: &[u8] = b"verify_result";

/// Whether `initialize_first_class_data` requires the current owner.
///
/// The submission path never exercised an unauthorized initializer, so this
/// is an explicit deployment policy rather than a hard-wired default.
/// Updates are owner-gated under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FcdInitPolicy {
    OwnerOnly,
    Open,
}

/// The ledger state machine. All state lives in the slot store; callers
/// pass their authenticated identity into every operation explicitly, there
/// is no ambient global state.
pub struct Ledger {
    storage: Storage,
    /// Identity of this deployed component; part of every derived address.
    component: AccountId,
    fcd_init_policy: FcdInitPolicy,
}

impl Ledger {
    pub fn new(storage: Storage, component: AccountId, fcd_init_policy: FcdInitPolicy) -> Self {
        Self {
            storage,
            component,
            fcd_init_policy,
        }
    }

    pub fn component(&self) -> &AccountId {
        &self.component
    }

    pub fn fcd_init_policy(&self) -> FcdInitPolicy {
        self.fcd_init_policy
    }

    pub(crate) fn storage(&self) -> &Storage {
        &self.storage
    }

    // ===== slot addressing =====

    pub(crate) fn authority_address(&self) -> Bytes32 {
        derive_address(&[AUTHORITY_SEED], &self.component)
    }

    pub(crate) fn status_address(&self) -> Bytes32 {
        derive_address(&[STATUS_SEED], &self.component)
    }

    /// Blocks are addressed by the positional encoding of their id alone.
    pub(crate) fn block_address(&self, seed: &Value32) -> Bytes32 {
        derive_address(&[seed], &self.component)
    }

    pub(crate) fn fcd_address(&self, key_seed: &Bytes32) -> Bytes32 {
        derive_address(&[key_seed], &self.component)
    }

    pub(crate) fn verify_result_address(&self, caller: &AccountId) -> Bytes32 {
        derive_address(&[VERIFY_RESULT_SEED, caller], &self.component)
    }

    // ===== reads =====

    pub fn authority(&self) -> LedgerResult<Authority> {
        self.storage
            .get(&self.authority_address())?
            .ok_or(LedgerError::NotFound("authority"))
    }

    pub fn status(&self) -> LedgerResult<Status> {
        self.storage
            .get(&self.status_address())?
            .ok_or(LedgerError::NotFound("status"))
    }

    pub fn block(&self, block_id: u32) -> LedgerResult<Block> {
        self.block_by_seed(&encode_positional(block_id as u64))
    }

    pub fn block_by_seed(&self, seed: &Value32) -> LedgerResult<Block> {
        self.storage
            .get(&self.block_address(seed))?
            .ok_or(LedgerError::NotFound("block"))
    }

    pub fn first_class_data(&self, key: &str) -> LedgerResult<FirstClassData> {
        let seed = encode_key(key)?;
        self.storage
            .get(&self.fcd_address(&seed))?
            .ok_or(LedgerError::NotFound("first class data"))
    }

    pub fn verify_result(&self, caller: &AccountId) -> LedgerResult<VerifyResult> {
        self.storage
            .get(&self.verify_result_address(caller))?
            .ok_or(LedgerError::NotFound("verify result"))
    }

    // ===== shared checks =====

    /// Load the authority and require `caller` to be the current owner.
    pub(crate) fn require_owner(&self, caller: &AccountId) -> LedgerResult<Authority> {
        let authority = self.authority()?;
        if authority.owner != *caller {
            return Err(LedgerError::OnlyOwnerViolation);
        }
        Ok(authority)
    }
}
