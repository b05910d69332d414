// Library exports for testing and external use

pub mod codec;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod gateway;
pub mod ledger;
pub mod storage;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use codec::{classify, decode_key, decode_value, encode_key, encode_value, KeyClass, LeafValue};
pub use config::BaseConfig;
pub use crypto::{derive_address, MerkleTree};
pub use errors::{LedgerError, LedgerResult};
pub use gateway::{CallerToken, VerificationGateway};
pub use ledger::{FcdInitPolicy, Ledger};
pub use storage::Storage;
pub use types::{
    bytes32_from_hex, bytes32_to_hex, AccountId, Authority, Block, Bytes32, FirstClassData, Key32,
    Status, Value32, VerifyResult,
};
