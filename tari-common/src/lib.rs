pub mod errors;
pub mod principal;

pub use errors::PrincipalError;
pub use principal::{Principal, PRINCIPAL_HRP};

/// Base-unit token quantity. Human-displayed amounts are scaled by
/// 10^decimals (6 for TARI).
pub type Amount = u128;
