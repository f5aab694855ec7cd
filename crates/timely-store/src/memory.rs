// crates/timely-store/src/memory.rs
//
// In-memory table store implementing the `StateStore` trait.
//
// Commits are applied to a copy of the tables and swapped in under the write
// lock, so readers never observe a half-applied batch.

use std::collections::BTreeMap;
use std::sync::RwLock;

use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::records::{GlobalConfig, RewardSchedule};
use timely_core::traits::{StateStore, StateWrite};

#[derive(Debug, Clone, Default)]
struct Tables {
    config: Option<GlobalConfig>,
    rewards: BTreeMap<AccountName, RewardSchedule>,
}

/// Volatile `StateStore` backed by a `BTreeMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of schedules currently stored.
    pub fn len(&self) -> usize {
        self.read().map(|t| t.rewards.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, TimelyError> {
        self.tables
            .read()
            .map_err(|_| TimelyError::Storage("memory store lock poisoned".to_string()))
    }
}

impl StateStore for MemoryStore {
    fn config(&self) -> Result<Option<GlobalConfig>, TimelyError> {
        Ok(self.read()?.config.clone())
    }

    fn reward(&self, user: &AccountName) -> Result<Option<RewardSchedule>, TimelyError> {
        Ok(self.read()?.rewards.get(user).cloned())
    }

    fn rewards(&self) -> Result<Vec<RewardSchedule>, TimelyError> {
        Ok(self.read()?.rewards.values().cloned().collect())
    }

    fn commit(&self, writes: Vec<StateWrite>) -> Result<(), TimelyError> {
        let mut guard = self
            .tables
            .write()
            .map_err(|_| TimelyError::Storage("memory store lock poisoned".to_string()))?;

        let mut next = guard.clone();
        for write in writes {
            match write {
                StateWrite::PutConfig(config) => next.config = Some(config),
                StateWrite::PutReward(reward) => {
                    next.rewards.insert(reward.user.clone(), reward);
                }
                StateWrite::DeleteReward(user) => {
                    next.rewards.remove(&user);
                }
            }
        }
        *guard = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timely_core::time::TimePointSec;

    fn schedule(user: &str) -> RewardSchedule {
        RewardSchedule {
            user: AccountName::new(user).unwrap(),
            remaining_rewards: "10.0000 EOS".parse().unwrap(),
            unlock_start: TimePointSec::from_secs(1_000),
            daily_rate: "1.0000 EOS".parse().unwrap(),
            last_claim: TimePointSec::from_secs(1_000),
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.config().unwrap(), None);
        assert!(store.rewards().unwrap().is_empty());
    }

    #[test]
    fn test_commit_put_and_delete() {
        let store = MemoryStore::new();
        store
            .commit(vec![
                StateWrite::PutConfig(GlobalConfig::default()),
                StateWrite::PutReward(schedule("bob")),
                StateWrite::PutReward(schedule("alice")),
            ])
            .unwrap();

        assert_eq!(store.config().unwrap(), Some(GlobalConfig::default()));
        let users: Vec<String> = store
            .rewards()
            .unwrap()
            .into_iter()
            .map(|r| r.user.to_string())
            .collect();
        assert_eq!(users, vec!["alice", "bob"]);

        store
            .commit(vec![StateWrite::DeleteReward(AccountName::new("bob").unwrap())])
            .unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.reward(&AccountName::new("bob").unwrap()).unwrap().is_none());
    }

    #[test]
    fn test_put_replaces_existing_row() {
        let store = MemoryStore::new();
        store.commit(vec![StateWrite::PutReward(schedule("alice"))]).unwrap();

        let mut updated = schedule("alice");
        updated.last_claim = TimePointSec::from_secs(2_000);
        store.commit(vec![StateWrite::PutReward(updated.clone())]).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.reward(&updated.user).unwrap(), Some(updated));
    }
}
