// crates/timely-rewards/src/config.rs
//
// Administrative configuration actions.
//
// The config row is created lazily by the first of these actions; until then
// every reader sees `GlobalConfig::default()` (unpaused, 8,WAX on eosio.token).
// Both actions are idempotent.

use timely_core::asset::Symbol;
use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::traits::{Clock, StateStore, TokenLedger};
use timely_store::StagedState;

use crate::contract::TimelyReward;

impl<S: StateStore, L: TokenLedger, C: Clock> TimelyReward<S, L, C> {
    /// Pause or unpause issuance and claims. Token fields are preserved.
    pub fn setpaused(&mut self, auth: &AccountName, paused: bool) -> Result<(), TimelyError> {
        self.require_admin(auth)?;

        let mut staged = StagedState::new(&self.store);
        let mut config = staged.config_or_default()?;
        config.paused = paused;
        staged.put_config(config);
        staged.commit()?;

        tracing::info!(paused, "Contract pause flag set");
        Ok(())
    }

    /// Select the reward token. The contract account must exist and carry a
    /// stat row for `symbol`'s code. `paused` is preserved.
    pub fn settoken(
        &mut self,
        auth: &AccountName,
        contract: &AccountName,
        symbol: &Symbol,
    ) -> Result<(), TimelyError> {
        self.require_admin(auth)?;

        if !self.ledger.is_account(contract) {
            return Err(TimelyError::UnknownContract);
        }
        if !self.ledger.token_exists(contract, symbol) {
            return Err(TimelyError::UnknownSymbol);
        }

        let mut staged = StagedState::new(&self.store);
        let mut config = staged.config_or_default()?;
        config.token_contract = contract.clone();
        config.token_symbol = symbol.clone();
        staged.put_config(config);
        staged.commit()?;

        tracing::info!(contract = %contract, symbol = %symbol, "Reward token set");
        Ok(())
    }
}
