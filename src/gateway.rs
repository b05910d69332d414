//! Verification gateway: the surface through which a second, independently
//! deployed component triggers proof verification.
//!
//! Trust is established by component identity alone, never by a shared
//! secret: the host runtime vouches for the identity in a [`CallerToken`],
//! and the gateway compares it against an explicit allow-list before
//! relaying the call. The relayed outcome is the verifier's plain boolean;
//! tampered proofs, keys or values surface as `false`, not as errors.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::types::{AccountId, Bytes32, Key32, Value32};

/// Host-authenticated identity of the component making a cross-component
/// call. Producing one of these is the host runtime's job; this core only
/// ever compares the identity inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerToken {
    pub component: AccountId,
}

/// Allow-list gate in front of the ledger's verification entry point.
pub struct VerificationGateway {
    trusted: BTreeSet<AccountId>,
}

impl VerificationGateway {
    pub fn new(trusted: impl IntoIterator<Item = AccountId>) -> Self {
        Self {
            trusted: trusted.into_iter().collect(),
        }
    }

    /// Add a component identity to the allow-list.
    pub fn trust(&mut self, component: AccountId) {
        self.trusted.insert(component);
    }

    pub fn is_trusted(&self, component: &AccountId) -> bool {
        self.trusted.contains(component)
    }

    /// Relay a verification request on behalf of the token's component.
    ///
    /// The outcome lands in that component's own VerifyResult slot, so the
    /// requester (or anyone trusting the verifying component's identity)
    /// can read it back afterwards.
    pub fn request_verification(
        &self,
        ledger: &Ledger,
        token: &CallerToken,
        block_seed: &Value32,
        proof: &[Bytes32],
        key: &Key32,
        value: &Value32,
    ) -> LedgerResult<bool> {
        if !self.is_trusted(&token.component) {
            warn!(
                component = %hex::encode(token.component),
                "verification request from untrusted component"
            );
            return Err(LedgerError::MissingAuthorization);
        }
        let result =
            ledger.verify_proof_for_block(&token.component, block_seed, proof, key, value)?;
        info!(
            component = %hex::encode(token.component),
            result,
            "verification relayed"
        );
        Ok(result)
    }
}
