// crates/timely-store/src/staged.rs
//
// Write staging for a single action.
//
// An action reads through `StagedState`, which overlays its own pending writes
// on top of the committed store, and nothing reaches the store until
// `commit` hands every write over in one batch. Dropping a `StagedState`
// without committing discards the action's writes, which is how a failed
// action (including a rejected token transfer) leaves no trace.

use std::collections::BTreeMap;

use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::records::{GlobalConfig, RewardSchedule};
use timely_core::traits::{StateStore, StateWrite};

/// Pending writes layered over a committed `StateStore`.
pub struct StagedState<'a, S: StateStore + ?Sized> {
    store: &'a S,
    config: Option<GlobalConfig>,
    /// `Some` = staged insert/update, `None` = staged delete.
    rewards: BTreeMap<AccountName, Option<RewardSchedule>>,
}

impl<'a, S: StateStore + ?Sized> StagedState<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            config: None,
            rewards: BTreeMap::new(),
        }
    }

    /// The configuration row as this action sees it, if one exists.
    pub fn config(&self) -> Result<Option<GlobalConfig>, TimelyError> {
        match &self.config {
            Some(config) => Ok(Some(config.clone())),
            None => self.store.config(),
        }
    }

    /// The configuration row, or the bootstrap defaults if none was ever written.
    pub fn config_or_default(&self) -> Result<GlobalConfig, TimelyError> {
        Ok(self.config()?.unwrap_or_default())
    }

    pub fn reward(&self, user: &AccountName) -> Result<Option<RewardSchedule>, TimelyError> {
        match self.rewards.get(user) {
            Some(staged) => Ok(staged.clone()),
            None => self.store.reward(user),
        }
    }

    pub fn put_config(&mut self, config: GlobalConfig) {
        self.config = Some(config);
    }

    pub fn put_reward(&mut self, reward: RewardSchedule) {
        self.rewards.insert(reward.user.clone(), Some(reward));
    }

    pub fn delete_reward(&mut self, user: &AccountName) {
        self.rewards.insert(user.clone(), None);
    }

    /// Whether any write has been staged.
    pub fn is_empty(&self) -> bool {
        self.config.is_none() && self.rewards.is_empty()
    }

    /// Drain the overlay into an ordered write batch.
    pub fn into_writes(self) -> Vec<StateWrite> {
        let mut writes = Vec::with_capacity(self.rewards.len() + 1);
        if let Some(config) = self.config {
            writes.push(StateWrite::PutConfig(config));
        }
        for (user, staged) in self.rewards {
            writes.push(match staged {
                Some(reward) => StateWrite::PutReward(reward),
                None => StateWrite::DeleteReward(user),
            });
        }
        writes
    }

    /// Hand every staged write to the store as one batch.
    pub fn commit(self) -> Result<(), TimelyError> {
        let store = self.store;
        let writes = self.into_writes();
        if writes.is_empty() {
            return Ok(());
        }
        store.commit(writes)
    }
}
