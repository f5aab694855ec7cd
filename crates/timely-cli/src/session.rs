// crates/timely-cli/src/session.rs
//
// Persistence glue for one CLI run.
//
// The contract tables and the local ledger snapshot live in the same RocksDB
// database. `SessionStore` commits every table batch together with the
// current ledger snapshot, so a claim's row update and its transfer become
// durable in one `WriteBatch` or not at all.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use timely_core::asset::{Asset, Symbol};
use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::records::{GlobalConfig, RewardSchedule};
use timely_core::traits::{StateStore, StateWrite, TokenLedger};
use timely_rewards::MemoryLedger;
use timely_store::RocksStore;

/// Key under which the serialized ledger lives next to the tables.
pub const LEDGER_KEY: &[u8] = b"ledger";

/// A `MemoryLedger` shared between the contract and the store.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger(Arc<RwLock<MemoryLedger>>);

impl SharedLedger {
    pub fn new(ledger: MemoryLedger) -> Self {
        Self(Arc::new(RwLock::new(ledger)))
    }

    // A poisoned lock still yields the data: every ledger operation
    // validates before it mutates.
    pub fn read(&self) -> RwLockReadGuard<'_, MemoryLedger> {
        self.0.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, MemoryLedger> {
        self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> Result<Vec<u8>, TimelyError> {
        Ok(serde_json::to_vec(&*self.read())?)
    }
}

impl TokenLedger for SharedLedger {
    fn is_account(&self, account: &AccountName) -> bool {
        self.read().is_account(account)
    }

    fn token_exists(&self, contract: &AccountName, symbol: &Symbol) -> bool {
        self.read().token_exists(contract, symbol)
    }

    fn transfer(
        &mut self,
        contract: &AccountName,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
        memo: &str,
    ) -> Result<(), TimelyError> {
        self.write().transfer(contract, from, to, quantity, memo)
    }
}

/// `RocksStore` whose commits carry the ledger snapshot.
#[derive(Debug)]
pub struct SessionStore {
    rocks: RocksStore,
    ledger: SharedLedger,
}

impl SessionStore {
    pub fn new(rocks: RocksStore, ledger: SharedLedger) -> Self {
        Self { rocks, ledger }
    }

    /// Load the ledger snapshot stored in `rocks`, or start an empty ledger.
    pub fn load_ledger(rocks: &RocksStore) -> Result<MemoryLedger, TimelyError> {
        match rocks.get_bytes(LEDGER_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(MemoryLedger::new()),
        }
    }

    /// Persist the ledger on its own, for runs that touch no table.
    pub fn save_ledger(&self) -> Result<(), TimelyError> {
        self.rocks.put_bytes(LEDGER_KEY, &self.ledger.snapshot()?)
    }
}

impl StateStore for SessionStore {
    fn config(&self) -> Result<Option<GlobalConfig>, TimelyError> {
        self.rocks.config()
    }

    fn reward(&self, user: &AccountName) -> Result<Option<RewardSchedule>, TimelyError> {
        self.rocks.reward(user)
    }

    fn rewards(&self) -> Result<Vec<RewardSchedule>, TimelyError> {
        self.rocks.rewards()
    }

    fn commit(&self, writes: Vec<StateWrite>) -> Result<(), TimelyError> {
        let snapshot = self.ledger.snapshot()?;
        self.rocks.commit_with(writes, &[(LEDGER_KEY, snapshot)])
    }
}
