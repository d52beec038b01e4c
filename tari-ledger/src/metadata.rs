use serde::{Deserialize, Serialize};

/// Immutable token metadata, fixed at genesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    /// Display precision: base units are scaled by 10^decimals.
    pub decimals: u8,
}
