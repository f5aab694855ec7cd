// crates/timely-rewards/src/claim.rs
//
// `claim`: settle everything a user has accrued since their last claim.
//
// Per-user lifecycle:
//   NoSchedule --addreward--> Locked --unlock_start--> Accruing --remaining == 0--> Exhausted (row deleted)
//
// Settlement at time `now`:
//   accrued = floor(daily_rate * (now - last_claim) / 86400)
//   settle  = min(accrued, remaining_rewards)
//
// The record update is staged, then the transfer is requested, and only after
// the ledger accepts it is the update committed. A rejected transfer drops the
// staged update. A zero settlement still succeeds and records `last_claim`,
// without any transfer.

use serde::Serialize;

use timely_core::asset::Asset;
use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::time::TimePointSec;
use timely_core::traits::{Clock, StateStore, TokenLedger};
use timely_store::StagedState;

use crate::contract::{TimelyReward, CLAIM_MEMO};

/// Outcome of a successful claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub user: AccountName,
    /// Amount transferred by this claim (possibly zero).
    pub settled: Asset,
    /// Balance left on the schedule after this claim.
    pub remaining_rewards: Asset,
    pub last_claim: TimePointSec,
    /// Whether the schedule was exhausted and deleted.
    pub exhausted: bool,
}

impl<S: StateStore, L: TokenLedger, C: Clock> TimelyReward<S, L, C> {
    /// Settle `user`'s accrued rewards. Must be authorized by `user`.
    pub fn claim(&mut self, auth: &AccountName, user: &AccountName) -> Result<Settlement, TimelyError> {
        if auth != user {
            return Err(TimelyError::UserNotAuthorized(user.clone()));
        }

        let mut staged = StagedState::new(&self.store);
        let config = staged.config_or_default()?;
        if config.paused {
            return Err(TimelyError::ContractPaused);
        }

        let mut reward = staged
            .reward(user)?
            .ok_or_else(|| TimelyError::NoRewards(user.clone()))?;

        let now = self.clock.now();
        if !reward.is_unlocked(now) {
            return Err(TimelyError::NotYetUnlocked(user.clone()));
        }

        let settled = reward.accrued_at(now);
        let previous_claim = reward.last_claim;
        reward.remaining_rewards = reward.remaining_rewards.saturating_sub(&settled)?;
        // last_claim >= unlock_start holds here because now >= unlock_start.
        reward.last_claim = now.max(reward.last_claim);

        tracing::debug!(
            user = %user,
            elapsed = now.saturating_since(previous_claim),
            settled = %settled,
            "Computed accrual"
        );

        let exhausted = reward.remaining_rewards.is_zero();
        if exhausted {
            staged.delete_reward(user);
        } else {
            staged.put_reward(reward.clone());
        }

        if !settled.is_zero() {
            if let Err(e) = self.ledger.transfer(
                &config.token_contract,
                &self.account,
                user,
                &settled,
                CLAIM_MEMO,
            ) {
                tracing::warn!(user = %user, quantity = %settled, error = %e, "Reward transfer rejected");
                return Err(e);
            }
        }
        staged.commit()?;

        tracing::info!(
            user = %user,
            settled = %settled,
            remaining = %reward.remaining_rewards,
            exhausted,
            "Rewards claimed"
        );

        Ok(Settlement {
            user: user.clone(),
            settled,
            remaining_rewards: reward.remaining_rewards,
            last_claim: reward.last_claim,
            exhausted,
        })
    }
}
