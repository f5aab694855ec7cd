// crates/timely-core/src/traits.rs
//
// Collaborator interfaces. The engine in timely-rewards only talks to the
// outside world through these three traits.

use crate::asset::{Asset, Symbol};
use crate::error::TimelyError;
use crate::name::AccountName;
use crate::records::{GlobalConfig, RewardSchedule};
use crate::time::TimePointSec;

/// A single staged mutation of contract state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateWrite {
    /// Insert or replace the configuration singleton.
    PutConfig(GlobalConfig),
    /// Insert or replace the schedule keyed by `RewardSchedule::user`.
    PutReward(RewardSchedule),
    /// Remove the schedule of the given user.
    DeleteReward(AccountName),
}

/// Persistent table storage for contract state.
///
/// Implemented by timely-store (in-memory and RocksDB backends).
pub trait StateStore: Send + Sync {
    /// The configuration row, if one has ever been written.
    fn config(&self) -> Result<Option<GlobalConfig>, TimelyError>;

    /// Exact-match lookup of a schedule by recipient.
    fn reward(&self, user: &AccountName) -> Result<Option<RewardSchedule>, TimelyError>;

    /// All schedules, ordered by recipient.
    fn rewards(&self) -> Result<Vec<RewardSchedule>, TimelyError>;

    /// Apply every write or none of them.
    fn commit(&self, writes: Vec<StateWrite>) -> Result<(), TimelyError>;
}

/// Narrow view of the external token ledger.
///
/// Implemented by `timely_rewards::ledger::MemoryLedger` for local use; a
/// production deployment binds it to the real chain.
pub trait TokenLedger {
    /// Whether an account exists on the chain.
    fn is_account(&self, account: &AccountName) -> bool;

    /// Whether `contract` has a token stat row for `symbol`'s code.
    /// Precision is not compared.
    fn token_exists(&self, contract: &AccountName, symbol: &Symbol) -> bool;

    /// Move `quantity` of `contract`'s token from `from` to `to`.
    ///
    /// Either the whole transfer happens or the ledger is left untouched and
    /// an error is returned.
    fn transfer(
        &mut self,
        contract: &AccountName,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
        memo: &str,
    ) -> Result<(), TimelyError>;
}

/// Monotonically non-decreasing time source.
pub trait Clock {
    fn now(&self) -> TimePointSec;
}
