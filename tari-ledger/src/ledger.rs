use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tari_common::{Amount, Principal};

use crate::error::{LedgerError, LedgerResult};
use crate::genesis::GenesisConfig;
use crate::metadata::TokenMetadata;

/// A single fungible-token ledger instance.
///
/// Holds the balance map, the supply counters, the administrative owner and
/// the mutable token URI. Every mutating operation takes the caller
/// identity explicitly, checks its preconditions in order (first failure
/// wins) and either fully applies or returns an error with zero mutation.
///
/// Operations take `&mut self`, so the exclusive borrow serializes access
/// to one instance. A multi-threaded embedder wraps the ledger in its own
/// `RwLock`; no internal locking is needed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    metadata: TokenMetadata,
    token_uri: String,
    max_supply: Amount,
    total_supply: Amount,
    owner: Principal,
    /// Absent key means balance 0.
    balances: HashMap<Principal, Amount>,
}

impl Ledger {
    /// Creates a ledger with the canonical Taricoin genesis parameters:
    /// the initial supply is minted to `deployer`, which also becomes the
    /// contract owner.
    pub fn genesis(deployer: Principal) -> Self {
        Self::build(GenesisConfig::default(), deployer)
    }

    /// Creates a ledger from explicit genesis parameters.
    pub fn with_config(config: GenesisConfig, deployer: Principal) -> LedgerResult<Self> {
        if config.initial_supply > config.max_supply {
            return Err(LedgerError::SupplyCapExceeded {
                max: config.max_supply,
                would_have: config.initial_supply,
            });
        }
        Ok(Self::build(config, deployer))
    }

    fn build(config: GenesisConfig, deployer: Principal) -> Self {
        tracing::info!(
            "🏛️ Genesis: {} base units of {} -> {}",
            config.initial_supply,
            config.symbol,
            deployer
        );

        let mut balances = HashMap::new();
        if config.initial_supply > 0 {
            balances.insert(deployer.clone(), config.initial_supply);
        }

        Self {
            metadata: TokenMetadata {
                name: config.name,
                symbol: config.symbol,
                decimals: config.decimals,
            },
            token_uri: config.token_uri,
            max_supply: config.max_supply,
            total_supply: config.initial_supply,
            owner: deployer,
            balances,
        }
    }

    // =========================================================================
    // Accessors (no mutation, no authorization)
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    pub fn max_supply(&self) -> Amount {
        self.max_supply
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of `account`, defaulting to 0 for accounts that never held
    /// tokens. Absence is not an error.
    pub fn balance_of(&self, account: &Principal) -> Amount {
        *self.balances.get(account).unwrap_or(&0)
    }

    pub fn contract_owner(&self) -> &Principal {
        &self.owner
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Iterates over accounts currently holding a nonzero balance.
    pub fn holders(&self) -> impl Iterator<Item = (&Principal, Amount)> {
        self.balances
            .iter()
            .filter(|(_, balance)| **balance > 0)
            .map(|(account, balance)| (account, *balance))
    }

    pub fn holder_count(&self) -> usize {
        self.holders().count()
    }

    /// Verifies the standing bookkeeping invariants over the full balance
    /// map: `total_supply == Σ balances` and `total_supply <= max_supply`.
    /// Operations maintain these incrementally; this full audit is meant
    /// for tests and embedder health checks.
    pub fn check_invariants(&self) -> bool {
        let sum: Amount = self.balances.values().sum();
        sum == self.total_supply && self.total_supply <= self.max_supply
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Moves `amount` base units from `sender` to `recipient`.
    ///
    /// Only `sender` itself may initiate the transfer; there is no
    /// delegated-spend path. The `memo` is opaque, carried for external
    /// auditing only.
    pub fn transfer(
        &mut self,
        caller: &Principal,
        amount: Amount,
        sender: &Principal,
        recipient: &Principal,
        memo: Option<&str>,
    ) -> LedgerResult<()> {
        require_caller(caller, sender, LedgerError::NotTokenOwner)?;
        require_positive(amount)?;

        let sender_balance = self.balance_of(sender);
        let debited = sender_balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                have: sender_balance,
                need: amount,
            })?;

        self.balances.insert(sender.clone(), debited);
        // Σ balances == total_supply <= max_supply, so the credit cannot overflow.
        let credited = self.balance_of(recipient) + amount;
        self.balances.insert(recipient.clone(), credited);

        match memo {
            Some(memo) => tracing::info!(
                "💸 Transfer: {} -> {} ({} base units, memo: {})",
                sender,
                recipient,
                amount,
                memo
            ),
            None => tracing::info!("💸 Transfer: {} -> {} ({} base units)", sender, recipient, amount),
        }

        Ok(())
    }

    /// Mints `amount` new base units to `recipient`. Owner-gated; the
    /// supply ceiling is a hard error, never clamped.
    pub fn mint(
        &mut self,
        caller: &Principal,
        amount: Amount,
        recipient: &Principal,
    ) -> LedgerResult<()> {
        require_caller(caller, &self.owner, LedgerError::OwnerOnly)?;
        require_positive(amount)?;

        let new_supply = match self.total_supply.checked_add(amount) {
            Some(next) if next <= self.max_supply => next,
            _ => {
                return Err(LedgerError::SupplyCapExceeded {
                    max: self.max_supply,
                    would_have: self.total_supply.saturating_add(amount),
                })
            }
        };

        let credited = self.balance_of(recipient) + amount;
        self.balances.insert(recipient.clone(), credited);
        self.total_supply = new_supply;

        tracing::info!(
            "🪙 Mint: {} base units -> {} (total supply {})",
            amount,
            recipient,
            self.total_supply
        );

        Ok(())
    }

    /// Burns `amount` base units held by `account`. Self-burn only: no
    /// third party, including the contract owner, may burn another's
    /// tokens.
    pub fn burn(
        &mut self,
        caller: &Principal,
        amount: Amount,
        account: &Principal,
    ) -> LedgerResult<()> {
        require_caller(caller, account, LedgerError::NotTokenOwner)?;
        require_positive(amount)?;

        let balance = self.balance_of(account);
        let debited = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                have: balance,
                need: amount,
            })?;

        self.balances.insert(account.clone(), debited);
        // balance(account) <= total_supply, so the reduction cannot underflow.
        self.total_supply -= amount;

        tracing::info!(
            "🔥 Burn: {} base units from {} (total supply {})",
            amount,
            account,
            self.total_supply
        );

        Ok(())
    }

    /// Overwrites the token URI. Owner-gated.
    pub fn set_token_uri(&mut self, caller: &Principal, uri: String) -> LedgerResult<()> {
        require_caller(caller, &self.owner, LedgerError::OwnerOnly)?;

        self.token_uri = uri;
        tracing::info!("📝 Token URI updated by {}", caller);

        Ok(())
    }

    /// Hands the contract over to `new_owner`. The transition is
    /// instantaneous: the old owner's administrative rights end with this
    /// call.
    pub fn set_contract_owner(
        &mut self,
        caller: &Principal,
        new_owner: Principal,
    ) -> LedgerResult<()> {
        require_caller(caller, &self.owner, LedgerError::OwnerOnly)?;

        tracing::info!("🔑 Contract owner: {} -> {}", self.owner, new_owner);
        self.owner = new_owner;

        Ok(())
    }
}

/// Shared caller-identity predicate: every mutating operation gates on the
/// caller matching a required principal (the contract owner for admin
/// operations, the subject account for self-authorized ones).
fn require_caller(
    caller: &Principal,
    expected: &Principal,
    err: LedgerError,
) -> LedgerResult<()> {
    if caller == expected {
        Ok(())
    } else {
        tracing::warn!("⛔ Rejected call from {} (requires {})", caller, expected);
        Err(err)
    }
}

fn require_positive(amount: Amount) -> LedgerResult<()> {
    if amount == 0 {
        Err(LedgerError::InvalidAmount)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    use super::*;

    fn principal() -> Principal {
        let key = SigningKey::generate(&mut OsRng);
        Principal::from_pk(&key.verifying_key()).unwrap()
    }

    #[test]
    fn unknown_account_has_zero_balance() {
        let ledger = Ledger::genesis(principal());
        assert_eq!(ledger.balance_of(&principal()), 0);
    }

    #[test]
    fn full_spend_leaves_invariants_intact() {
        let deployer = principal();
        let recipient = principal();
        let mut ledger = Ledger::genesis(deployer.clone());

        let everything = ledger.balance_of(&deployer);
        ledger
            .transfer(&deployer, everything, &deployer, &recipient, None)
            .unwrap();

        assert_eq!(ledger.balance_of(&deployer), 0);
        assert_eq!(ledger.balance_of(&recipient), everything);
        assert!(ledger.check_invariants());
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let deployer = principal();
        let mut ledger = Ledger::genesis(deployer.clone());
        let before = ledger.balance_of(&deployer);

        ledger
            .transfer(&deployer, 1_000, &deployer, &deployer, None)
            .unwrap();

        assert_eq!(ledger.balance_of(&deployer), before);
        assert!(ledger.check_invariants());
    }

    #[test]
    fn holders_skips_emptied_accounts() {
        let deployer = principal();
        let recipient = principal();
        let mut ledger = Ledger::genesis(deployer.clone());

        let everything = ledger.balance_of(&deployer);
        ledger
            .transfer(&deployer, everything, &deployer, &recipient, None)
            .unwrap();

        assert_eq!(ledger.holder_count(), 1);
        let (holder, balance) = ledger.holders().next().unwrap();
        assert_eq!(holder, &recipient);
        assert_eq!(balance, everything);
    }

    #[test]
    fn config_with_oversized_initial_supply_is_rejected() {
        let config = GenesisConfig {
            max_supply: 100,
            initial_supply: 101,
            ..GenesisConfig::default()
        };

        let err = Ledger::with_config(config, principal()).unwrap_err();
        assert!(matches!(err, LedgerError::SupplyCapExceeded { max: 100, would_have: 101 }));
    }

    #[test]
    fn zero_initial_supply_starts_empty() {
        let deployer = principal();
        let config = GenesisConfig {
            initial_supply: 0,
            ..GenesisConfig::default()
        };

        let ledger = Ledger::with_config(config, deployer.clone()).unwrap();
        assert_eq!(ledger.total_supply(), 0);
        assert_eq!(ledger.balance_of(&deployer), 0);
        assert_eq!(ledger.holder_count(), 0);
        assert!(ledger.check_invariants());
    }
}
