use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;

use rootledger::config::BaseConfig;
use rootledger::errors::LedgerError;
use rootledger::ledger::{FcdInitPolicy, Ledger};
use rootledger::storage::Storage;
use rootledger::telemetry;
use rootledger::types::{bytes32_from_hex, AccountId};

fn parse_identity(s: &str) -> Result<AccountId> {
    bytes32_from_hex(s).map_err(|e| anyhow!("invalid identity {s:?}: {e}"))
}

fn main() -> Result<()> {
    telemetry::init();
    info!("Starting rootledger");

    let config = BaseConfig::parse();
    info!(
        "Configuration: storage_path={}, padding={}",
        config.storage_path, config.padding
    );

    let component = parse_identity(&config.component)?;
    let owner = match &config.owner {
        Some(s) => parse_identity(s)?,
        None => component,
    };
    let policy = if config.open_fcd_init {
        FcdInitPolicy::Open
    } else {
        FcdInitPolicy::OwnerOnly
    };

    let storage = Storage::open(&config.storage_path)?;
    info!("Storage opened at: {}", config.storage_path);

    let ledger = Ledger::new(storage, component, policy);
    match ledger.initialize(&owner, config.padding) {
        Ok(()) => info!("Ledger initialized, owner={}", hex::encode(owner)),
        Err(LedgerError::AlreadyInitialized(_)) => {
            let status = ledger.status()?;
            info!(
                "Ledger already initialized: last_id={}, next_block_id={}, padding={}",
                status.last_id, status.next_block_id, status.padding
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
