// crates/timely-core/src/records.rs
//
// Persisted rows of the Timely Reward contract.
//
//   config  (singleton) -> GlobalConfig
//   rewards (by user)   -> RewardSchedule
//
// Field names are the externally visible column names, so rows serialize to
// exactly the shape external inspectors expect, e.g.
//   { "user": "alice", "remaining_rewards": "940.47619048 BTC",
//     "unlock_start": "2022-01-02T00:00:00", "daily_rate": "142.85714285 BTC",
//     "last_claim": "2022-01-02T10:00:00" }

use serde::{Deserialize, Serialize};

use crate::asset::{Asset, Symbol};
use crate::name::AccountName;
use crate::time::TimePointSec;

/// Bootstrap reward token contract.
pub const DEFAULT_TOKEN_CONTRACT: &str = "eosio.token";

/// Bootstrap reward token code.
pub const DEFAULT_TOKEN_CODE: &str = "WAX";

/// Bootstrap reward token precision.
pub const DEFAULT_TOKEN_PRECISION: u8 = 8;

/// Contract-wide configuration singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// When true, issuance and claims are refused.
    pub paused: bool,
    /// Account of the token contract that holds the reward token.
    pub token_contract: AccountName,
    /// Accepted reward denomination.
    pub token_symbol: Symbol,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            paused: false,
            token_contract: AccountName::new(DEFAULT_TOKEN_CONTRACT)
                .expect("default token contract is a valid name"),
            token_symbol: Symbol::new(DEFAULT_TOKEN_PRECISION, DEFAULT_TOKEN_CODE)
                .expect("default token symbol is valid"),
        }
    }
}

/// A recipient's linear vesting schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSchedule {
    /// Recipient; also the primary key.
    pub user: AccountName,
    /// Portion not yet claimed.
    pub remaining_rewards: Asset,
    /// Instant at which accrual begins.
    pub unlock_start: TimePointSec,
    /// Accrual per 24 hours, fixed at creation.
    pub daily_rate: Asset,
    /// Instant through which accrual has been settled.
    pub last_claim: TimePointSec,
}

impl RewardSchedule {
    /// Whether the schedule has started accruing at `now`.
    pub fn is_unlocked(&self, now: TimePointSec) -> bool {
        now >= self.unlock_start
    }

    /// Amount a claim at `now` would settle: accrual since `last_claim`,
    /// capped at `remaining_rewards`.
    pub fn accrued_at(&self, now: TimePointSec) -> Asset {
        let elapsed = now.saturating_since(self.last_claim);
        let accrued = self.daily_rate.scale_by_time_fraction(elapsed);
        if accrued.amount > self.remaining_rewards.amount {
            self.remaining_rewards.clone()
        } else {
            accrued
        }
    }
}
