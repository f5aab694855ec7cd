// crates/timely-store/src/rocks.rs
//
// RocksDB-backed persistent storage for contract tables.
//
// Key format:
//   - `config`         -> JSON-serialized GlobalConfig
//   - `reward:{user}`  -> JSON-serialized RewardSchedule
//   - anything else    -> opaque bytes via `put_bytes` / `get_bytes`
//
// `commit` turns a staged batch into a single RocksDB `WriteBatch`, so a batch
// is applied atomically or not at all. `commit_with` lets a caller ride extra
// raw keys along in that same batch.

use rocksdb::{DBWithThreadMode, MultiThreaded, Options, WriteBatch};

use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::records::{GlobalConfig, RewardSchedule};
use timely_core::traits::{StateStore, StateWrite};

const CONFIG_KEY: &[u8] = b"config";
const REWARD_PREFIX: &str = "reward:";

/// RocksDB wrapper implementing the `StateStore` trait.
#[derive(Debug)]
pub struct RocksStore {
    db: DBWithThreadMode<MultiThreaded>,
}

impl RocksStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, TimelyError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path).map_err(|e| {
            TimelyError::Storage(format!("Failed to open RocksDB at {}: {}", path, e))
        })?;

        Ok(Self { db })
    }

    /// Build the primary key for a schedule: `reward:{user}`.
    fn reward_key(user: &AccountName) -> Vec<u8> {
        format!("{}{}", REWARD_PREFIX, user).into_bytes()
    }

    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TimelyError> {
        self.db
            .get(key)
            .map_err(|e| TimelyError::Storage(format!("RocksDB get failed: {}", e)))
    }

    fn require_unreserved(key: &[u8]) -> Result<(), TimelyError> {
        if key == CONFIG_KEY || key.starts_with(REWARD_PREFIX.as_bytes()) {
            return Err(TimelyError::Storage(format!(
                "key {:?} is reserved for contract tables",
                String::from_utf8_lossy(key)
            )));
        }
        Ok(())
    }

    /// Store a value under an arbitrary key outside the contract tables.
    pub fn put_bytes(&self, key: &[u8], value: &[u8]) -> Result<(), TimelyError> {
        Self::require_unreserved(key)?;
        self.db
            .put(key, value)
            .map_err(|e| TimelyError::Storage(format!("RocksDB put failed: {}", e)))
    }

    /// Apply table writes together with raw key/value pairs in one
    /// `WriteBatch`. The raw keys follow the same rules as `put_bytes`.
    pub fn commit_with(
        &self,
        writes: Vec<StateWrite>,
        extra: &[(&[u8], Vec<u8>)],
    ) -> Result<(), TimelyError> {
        let mut batch = WriteBatch::default();
        for (key, value) in extra {
            Self::require_unreserved(key)?;
            batch.put(key, value);
        }
        for write in writes {
            match write {
                StateWrite::PutConfig(config) => {
                    batch.put(CONFIG_KEY, serde_json::to_vec(&config)?);
                }
                StateWrite::PutReward(reward) => {
                    batch.put(Self::reward_key(&reward.user), serde_json::to_vec(&reward)?);
                }
                StateWrite::DeleteReward(user) => {
                    batch.delete(Self::reward_key(&user));
                }
            }
        }
        self.db
            .write(batch)
            .map_err(|e| TimelyError::Storage(format!("RocksDB batch write failed: {}", e)))
    }

    /// Retrieve a value stored with `put_bytes`.
    pub fn get_bytes(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TimelyError> {
        self.get_raw(key)
    }
}

impl StateStore for RocksStore {
    fn config(&self) -> Result<Option<GlobalConfig>, TimelyError> {
        match self.get_raw(CONFIG_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn reward(&self, user: &AccountName) -> Result<Option<RewardSchedule>, TimelyError> {
        match self.get_raw(&Self::reward_key(user))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn rewards(&self) -> Result<Vec<RewardSchedule>, TimelyError> {
        let prefix = REWARD_PREFIX.as_bytes();
        let mut rewards = Vec::new();

        for item in self.db.prefix_iterator(prefix) {
            let (key, value) = item
                .map_err(|e| TimelyError::Storage(format!("RocksDB iteration error: {}", e)))?;

            // No prefix extractor is configured, so stop once we leave the range.
            if !key.starts_with(prefix) {
                break;
            }
            rewards.push(serde_json::from_slice(&value)?);
        }

        Ok(rewards)
    }

    fn commit(&self, writes: Vec<StateWrite>) -> Result<(), TimelyError> {
        self.commit_with(writes, &[])
    }
}
