use tari_common::Amount;
use thiserror::Error;

/// Errors surfaced by ledger operations.
///
/// Every precondition is checked before any mutation, so a returned error
/// guarantees the ledger state is untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The caller is not the contract owner (admin-gated operation).
    #[error("Caller is not the contract owner")]
    OwnerOnly,

    /// The caller is not the holding account of a self-authorized
    /// operation (transfer, burn).
    #[error("Caller is not the token owner")]
    NotTokenOwner,

    /// The debited account does not hold enough base units.
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    /// The amount is not strictly positive.
    #[error("Amount must be strictly positive")]
    InvalidAmount,

    /// Minting would push the total supply past the immutable ceiling.
    #[error("Supply cap exceeded: max {max}, would have {would_have}")]
    SupplyCapExceeded { max: Amount, would_have: Amount },
}

impl LedgerError {
    /// Stable numeric code for hosts that surface failures as integers.
    ///
    /// 100 and 101 are authorization failures, 103 is amount validation;
    /// both arithmetic guards share 102.
    pub fn code(&self) -> u32 {
        match self {
            LedgerError::OwnerOnly => 100,
            LedgerError::NotTokenOwner => 101,
            LedgerError::InsufficientBalance { .. }
            | LedgerError::SupplyCapExceeded { .. } => 102,
            LedgerError::InvalidAmount => 103,
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
