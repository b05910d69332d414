use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Base configuration for the ledger component.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "rootledger", about = "On-chain oracle ledger core")]
pub struct BaseConfig {
    /// Path for persistent slot storage (RocksDB).
    #[arg(long, default_value = "./data")]
    pub storage_path: String,

    /// Proof-depth bound written into Status at initialization.
    #[arg(long, default_value_t = 64)]
    pub padding: u32,

    /// Allow any caller to initialize first class data entries.
    /// Updates stay owner-gated regardless.
    #[arg(long)]
    pub open_fcd_init: bool,

    /// Identity of this deployed component, as a 32-byte hex string.
    #[arg(long, default_value = "0x0000000000000000000000000000000000000000000000000000000000000001")]
    pub component: String,

    /// Identity of the operator initializing the ledger, as 32-byte hex.
    /// Defaults to the component identity.
    #[arg(long)]
    pub owner: Option<String>,

    /// Component identities trusted to request verification through the
    /// gateway, as 32-byte hex strings.
    #[arg(long)]
    pub trusted_components: Vec<String>,
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            storage_path: "./data".to_string(),
            padding: 64,
            open_fcd_init: false,
            component: "0x0000000000000000000000000000000000000000000000000000000000000001"
                .to_string(),
            owner: None,
            trusted_components: Vec::new(),
        }
    }
}

impl BaseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading config file {}", path.as_ref().display()))?;
        serde_json::from_str(&raw).context("parsing config file")
    }
}
