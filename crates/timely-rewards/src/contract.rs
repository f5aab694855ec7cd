// crates/timely-rewards/src/contract.rs
//
// The Timely Reward contract: owns its state store, a handle to the token
// ledger, and a clock, and exposes the four actions plus read-only queries.
//
// Actions live in sibling modules:
//   - config.rs   -> setpaused, settoken
//   - issuance.rs -> addreward
//   - claim.rs    -> claim
//
// Every action stages its writes in a `StagedState` and commits once at the
// end, so any failure leaves the tables exactly as they were.

use serde::Serialize;

use timely_core::asset::Asset;
use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::records::{GlobalConfig, RewardSchedule};
use timely_core::time::TimePointSec;
use timely_core::traits::{Clock, StateStore, TokenLedger};

/// Memo attached to every reward transfer.
pub const CLAIM_MEMO: &str = "timely reward claim";

/// The vesting contract bound to its collaborators.
pub struct TimelyReward<S, L, C> {
    /// The contract's own account: the administrative identity and the
    /// sender of every reward transfer.
    pub(crate) account: AccountName,
    pub(crate) store: S,
    pub(crate) ledger: L,
    pub(crate) clock: C,
}

/// Read-only snapshot of what a claim would settle at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimQuote {
    pub user: AccountName,
    pub at: TimePointSec,
    pub unlocked: bool,
    pub claimable: Asset,
    pub remaining_rewards: Asset,
    pub daily_rate: Asset,
    pub last_claim: TimePointSec,
}

impl<S: StateStore, L: TokenLedger, C: Clock> TimelyReward<S, L, C> {
    pub fn new(account: AccountName, store: S, ledger: L, clock: C) -> Self {
        Self {
            account,
            store,
            ledger,
            clock,
        }
    }

    pub fn account(&self) -> &AccountName {
        &self.account
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Administrative actions must be authorized by the contract account.
    pub(crate) fn require_admin(&self, auth: &AccountName) -> Result<(), TimelyError> {
        if *auth == self.account {
            Ok(())
        } else {
            Err(TimelyError::Unauthorized)
        }
    }

    /// Effective configuration: the stored row, or the bootstrap defaults.
    pub fn config(&self) -> Result<GlobalConfig, TimelyError> {
        Ok(self.store.config()?.unwrap_or_default())
    }

    pub fn reward(&self, user: &AccountName) -> Result<Option<RewardSchedule>, TimelyError> {
        self.store.reward(user)
    }

    /// Full scan of the rewards table.
    pub fn rewards(&self) -> Result<Vec<RewardSchedule>, TimelyError> {
        self.store.rewards()
    }

    /// What `claim` would settle for `user` right now, without mutating anything.
    ///
    /// Fails with `NoRewards` when the user has no schedule; a locked schedule
    /// quotes zero.
    pub fn pending(&self, user: &AccountName) -> Result<ClaimQuote, TimelyError> {
        let reward = self
            .store
            .reward(user)?
            .ok_or_else(|| TimelyError::NoRewards(user.clone()))?;
        let now = self.clock.now();
        let unlocked = reward.is_unlocked(now);
        let claimable = if unlocked {
            reward.accrued_at(now)
        } else {
            Asset::zero(reward.remaining_rewards.symbol.clone())
        };

        Ok(ClaimQuote {
            user: reward.user,
            at: now,
            unlocked,
            claimable,
            remaining_rewards: reward.remaining_rewards,
            daily_rate: reward.daily_rate,
            last_claim: reward.last_claim,
        })
    }
}
