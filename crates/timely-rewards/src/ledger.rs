// crates/timely-rewards/src/ledger.rs
//
// In-memory token ledger modelled on the reference eosio.token contract.
//
// Each token contract owns a stat table (one row per symbol code holding
// supply, max supply, and issuer) and per-owner balances. The ledger also
// tracks which accounts exist, which is what `settoken` consults before
// accepting a token contract.
//
// `MemoryLedger` is serializable so the CLI can persist it between runs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use timely_core::asset::{Asset, Symbol, SymbolCode};
use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::traits::TokenLedger;

/// Maximum transfer memo length in bytes.
pub const MAX_MEMO_BYTES: usize = 256;

/// Failures reported by the ledger, using eosio.token wording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("account {0} does not exist")]
    UnknownAccount(AccountName),

    #[error("token with symbol already exists")]
    TokenExists,

    #[error("token with symbol does not exist")]
    UnknownToken,

    #[error("invalid quantity")]
    InvalidQuantity,

    #[error("quantity must be positive")]
    NonPositiveQuantity,

    #[error("symbol precision mismatch")]
    PrecisionMismatch,

    #[error("quantity exceeds available supply")]
    ExceedsSupply,

    #[error("overdrawn balance")]
    Overdrawn,

    #[error("cannot transfer to self")]
    SelfTransfer,

    #[error("memo has more than 256 bytes")]
    MemoTooLong,
}

impl From<LedgerError> for TimelyError {
    fn from(e: LedgerError) -> Self {
        TimelyError::TransferFailed(e.to_string())
    }
}

/// One row of a token contract's stat table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStat {
    pub supply: Asset,
    pub max_supply: Asset,
    pub issuer: AccountName,
}

/// Local stand-in for the chain's accounts and token contracts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLedger {
    accounts: BTreeSet<AccountName>,
    /// contract -> code -> stat row
    stats: BTreeMap<AccountName, BTreeMap<SymbolCode, TokenStat>>,
    /// contract -> owner -> code -> balance
    balances: BTreeMap<AccountName, BTreeMap<AccountName, BTreeMap<SymbolCode, Asset>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account. Returns `false` if it already existed.
    pub fn create_account(&mut self, account: &AccountName) -> bool {
        self.accounts.insert(account.clone())
    }

    fn require_account(&self, account: &AccountName) -> Result<(), LedgerError> {
        if self.accounts.contains(account) {
            Ok(())
        } else {
            Err(LedgerError::UnknownAccount(account.clone()))
        }
    }

    fn require_positive(quantity: &Asset) -> Result<(), LedgerError> {
        if !quantity.is_valid() {
            return Err(LedgerError::InvalidQuantity);
        }
        if quantity.amount <= 0 {
            return Err(LedgerError::NonPositiveQuantity);
        }
        Ok(())
    }

    /// Create a token on `contract` with the given maximum supply.
    pub fn create_token(
        &mut self,
        contract: &AccountName,
        issuer: &AccountName,
        max_supply: &Asset,
    ) -> Result<(), LedgerError> {
        self.require_account(contract)?;
        self.require_account(issuer)?;
        Self::require_positive(max_supply)?;

        let table = self.stats.entry(contract.clone()).or_default();
        let code = max_supply.symbol.code().clone();
        if table.contains_key(&code) {
            return Err(LedgerError::TokenExists);
        }
        table.insert(
            code,
            TokenStat {
                supply: Asset::zero(max_supply.symbol.clone()),
                max_supply: max_supply.clone(),
                issuer: issuer.clone(),
            },
        );
        Ok(())
    }

    /// Mint `quantity` of an existing token directly to `to`.
    pub fn issue(
        &mut self,
        contract: &AccountName,
        to: &AccountName,
        quantity: &Asset,
    ) -> Result<(), LedgerError> {
        self.require_account(to)?;
        Self::require_positive(quantity)?;
        let stat = self.checked_stat(contract, &quantity.symbol)?;

        let supply = stat
            .supply
            .checked_add(quantity)
            .map_err(|_| LedgerError::ExceedsSupply)?;
        if supply.amount > stat.max_supply.amount {
            return Err(LedgerError::ExceedsSupply);
        }
        let balance = self
            .balance(contract, to, &quantity.symbol)
            .checked_add(quantity)
            .map_err(|_| LedgerError::ExceedsSupply)?;

        if let Some(stat) = self
            .stats
            .get_mut(contract)
            .and_then(|t| t.get_mut(quantity.symbol.code()))
        {
            stat.supply = supply;
        }
        self.set_balance(contract, to, balance);
        Ok(())
    }

    /// Stat row for `code` on `contract`, if the token exists.
    pub fn stat(&self, contract: &AccountName, code: &SymbolCode) -> Option<&TokenStat> {
        self.stats.get(contract).and_then(|t| t.get(code))
    }

    /// Stat row that must exist and match `symbol`'s precision.
    fn checked_stat(&self, contract: &AccountName, symbol: &Symbol) -> Result<TokenStat, LedgerError> {
        let stat = self
            .stat(contract, symbol.code())
            .ok_or(LedgerError::UnknownToken)?;
        if stat.supply.symbol != *symbol {
            return Err(LedgerError::PrecisionMismatch);
        }
        Ok(stat.clone())
    }

    /// Balance of `owner` in `contract`'s `symbol` token (zero if none).
    pub fn balance(&self, contract: &AccountName, owner: &AccountName, symbol: &Symbol) -> Asset {
        self.balances
            .get(contract)
            .and_then(|owners| owners.get(owner))
            .and_then(|rows| rows.get(symbol.code()))
            .cloned()
            .unwrap_or_else(|| Asset::zero(symbol.clone()))
    }

    fn set_balance(&mut self, contract: &AccountName, owner: &AccountName, balance: Asset) {
        self.balances
            .entry(contract.clone())
            .or_default()
            .entry(owner.clone())
            .or_default()
            .insert(balance.symbol.code().clone(), balance);
    }

    /// eosio.token-style transfer. Validates everything before touching any balance.
    pub fn transfer_token(
        &mut self,
        contract: &AccountName,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
        memo: &str,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        self.require_account(from)?;
        self.require_account(to)?;
        Self::require_positive(quantity)?;
        self.checked_stat(contract, &quantity.symbol)?;
        if memo.len() > MAX_MEMO_BYTES {
            return Err(LedgerError::MemoTooLong);
        }

        let from_balance = self.balance(contract, from, &quantity.symbol);
        if from_balance.amount < quantity.amount {
            return Err(LedgerError::Overdrawn);
        }
        let from_after = Asset::new(from_balance.amount - quantity.amount, quantity.symbol.clone());
        let to_after = self
            .balance(contract, to, &quantity.symbol)
            .checked_add(quantity)
            .map_err(|_| LedgerError::InvalidQuantity)?;

        self.set_balance(contract, from, from_after);
        self.set_balance(contract, to, to_after);
        Ok(())
    }
}

impl TokenLedger for MemoryLedger {
    fn is_account(&self, account: &AccountName) -> bool {
        self.accounts.contains(account)
    }

    fn token_exists(&self, contract: &AccountName, symbol: &Symbol) -> bool {
        self.stat(contract, symbol.code()).is_some()
    }

    fn transfer(
        &mut self,
        contract: &AccountName,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
        memo: &str,
    ) -> Result<(), TimelyError> {
        Ok(self.transfer_token(contract, from, to, quantity, memo)?)
    }
}
