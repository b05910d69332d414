use thiserror::Error;

/// Error taxonomy for the ledger core.
///
/// Every failure is reported synchronously as the outcome of the attempted
/// operation; nothing is retried internally and no operation partially
/// applies its writes on failure. A "not included" verification outcome is
/// not an error, it is a successful call yielding `false`.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("already initialized: {0}")]
    AlreadyInitialized(&'static str),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("only the current owner may perform this operation")]
    OnlyOwnerViolation,

    #[error("missing authorization from the new owner")]
    MissingAuthorization,

    #[error("cannot submit older data: block id {block_id} <= last id {last_id}")]
    CannotSubmitOlderData { block_id: u32, last_id: u32 },

    #[error("block {0} already exists")]
    BlockAlreadyExists(u32),

    #[error("invalid value for key: {0}")]
    InvalidValueForKey(String),

    #[error("precision loss: {0}")]
    PrecisionLoss(String),

    #[error("key too long: {0} bytes, max 32")]
    KeyTooLong(usize),

    #[error("malformed proof: {0}")]
    MalformedProof(String),

    #[error("storage error: {0}")]
    Storage(#[from] rocksdb::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
