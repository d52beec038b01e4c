use serde::{Deserialize, Serialize};
use tari_common::Amount;

pub const TOKEN_NAME: &str = "Taricoin";
pub const TOKEN_SYMBOL: &str = "TARI";
pub const TOKEN_DECIMALS: u8 = 6;

/// Immutable supply ceiling: 1,000,000,000 TARI in base units.
pub const MAX_SUPPLY: Amount = 1_000_000_000_000_000;

/// Base units minted to the deployer at genesis: 100,000 TARI.
pub const INITIAL_SUPPLY: Amount = 100_000_000_000;

pub const TOKEN_URI: &str = "https://taricoin.com/metadata.json";

/// Genesis parameters of a ledger instance.
///
/// The canonical Taricoin deployment uses [`GenesisConfig::default`];
/// alternate configs exist for embedders and tests that need their own
/// supply schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Immutable ceiling on circulating base units.
    pub max_supply: Amount,
    /// Base units minted to the deployer at genesis.
    pub initial_supply: Amount,
    pub token_uri: String,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            name: TOKEN_NAME.to_string(),
            symbol: TOKEN_SYMBOL.to_string(),
            decimals: TOKEN_DECIMALS,
            max_supply: MAX_SUPPLY,
            initial_supply: INITIAL_SUPPLY,
            token_uri: TOKEN_URI.to_string(),
        }
    }
}

impl GenesisConfig {
    /// Parses a genesis config from its JSON representation.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
