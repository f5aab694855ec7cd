// crates/timely-rewards/src/issuance.rs
//
// `addreward`: grant every listed recipient the full `quantity`, vesting
// linearly over `unlock_days` days from `unlock_start`.
//
// Preconditions are checked in a fixed order and the first failure wins:
//   admin auth -> not paused -> recipients non-empty -> quantity valid,
//   positive, and in the reward symbol -> unlock start in the future ->
//   positive period -> no existing schedule per recipient.
//
// The batch is all-or-nothing: one duplicate recipient rejects the whole list.

use timely_core::asset::Asset;
use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::records::RewardSchedule;
use timely_core::time::TimePointSec;
use timely_core::traits::{Clock, StateStore, TokenLedger};
use timely_store::StagedState;

use crate::contract::TimelyReward;

impl<S: StateStore, L: TokenLedger, C: Clock> TimelyReward<S, L, C> {
    /// Create one schedule per recipient with identical terms.
    pub fn addreward(
        &mut self,
        auth: &AccountName,
        recipients: &[AccountName],
        quantity: &Asset,
        unlock_start: TimePointSec,
        unlock_days: u16,
    ) -> Result<(), TimelyError> {
        self.require_admin(auth)?;

        let mut staged = StagedState::new(&self.store);
        let config = staged.config_or_default()?;
        if config.paused {
            return Err(TimelyError::ContractPaused);
        }

        if recipients.is_empty() {
            return Err(TimelyError::EmptyRecipientList);
        }

        if !quantity.is_valid() {
            return Err(TimelyError::InvalidQuantity);
        }
        if quantity.amount <= 0 {
            return Err(TimelyError::NegativeQuantity);
        }
        if quantity.symbol != config.token_symbol {
            return Err(TimelyError::SymbolMismatch);
        }

        if unlock_start <= self.clock.now() {
            return Err(TimelyError::UnlockInPast);
        }

        let daily_rate = quantity
            .div_floor(unlock_days)
            .ok_or(TimelyError::InvalidPeriod)?;

        for user in recipients {
            if staged.reward(user)?.is_some() {
                return Err(TimelyError::DuplicateRecipient(user.clone()));
            }
            staged.put_reward(RewardSchedule {
                user: user.clone(),
                remaining_rewards: quantity.clone(),
                unlock_start,
                daily_rate: daily_rate.clone(),
                last_claim: unlock_start,
            });
        }
        staged.commit()?;

        tracing::info!(
            recipients = recipients.len(),
            quantity = %quantity,
            daily_rate = %daily_rate,
            unlock_start = %unlock_start,
            unlock_days,
            "Rewards added"
        );
        Ok(())
    }
}
