//! Taricoin fungible-token ledger.
//!
//! A [`Ledger`] tracks per-account balances of a fixed-decimal divisible
//! asset, enforces a single-owner administrative model and exposes the
//! supply-changing operations (mint, burn) alongside peer-to-peer transfer.
//!
//! The hosting environment is an external collaborator: it validates and
//! serializes calls, persists the state between them, and supplies the
//! caller identity. This crate only implements the state transitions and
//! the authorization checks that gate them.

pub mod error;
pub mod genesis;
pub mod ledger;
pub mod metadata;

pub use error::{LedgerError, LedgerResult};
pub use genesis::GenesisConfig;
pub use ledger::Ledger;
pub use metadata::TokenMetadata;
