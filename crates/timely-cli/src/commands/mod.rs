// crates/timely-cli/src/commands/mod.rs
//
// Command modules for the Timely CLI, plus the shared session plumbing:
// every command opens the RocksDB tables under `data_dir`, loads the local
// token ledger persisted next to them, and runs against a clock pinned to
// `--now` (or the current time). Table commits carry the ledger snapshot
// (see `session.rs`); ledger-only commands persist it with `save`.

pub mod actions;
pub mod ledger;
pub mod tables;

use thiserror::Error;

use timely_core::error::TimelyError;
use timely_core::name::AccountName;
use timely_core::time::{ManualClock, SystemClock, TimePointSec};
use timely_core::traits::Clock;
use timely_rewards::{LedgerError, TimelyReward};
use timely_store::RocksStore;

use crate::config::CliConfig;
use crate::output::OutputFormat;
use crate::session::{SessionStore, SharedLedger};

pub type Contract = TimelyReward<SessionStore, SharedLedger, ManualClock>;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Contract(#[from] TimelyError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: CliConfig,
    /// Account authorizing the action (`--auth`).
    pub auth: Option<AccountName>,
    /// Pinned current time (`--now`).
    pub now: Option<TimePointSec>,
    pub format: OutputFormat,
}

impl Context {
    pub fn contract_account(&self) -> Result<AccountName, CliError> {
        Ok(AccountName::new(&self.config.contract_account)?)
    }

    /// `--auth`, or `default` when the flag is absent.
    pub fn auth_or(&self, default: &AccountName) -> AccountName {
        self.auth.clone().unwrap_or_else(|| default.clone())
    }

    /// Open the tables and ledger under `data_dir` and bind the contract.
    pub fn open(&self) -> Result<Contract, CliError> {
        let data_dir = self.config.data_dir_path();
        std::fs::create_dir_all(&data_dir)?;
        let rocks = RocksStore::open(&data_dir.to_string_lossy())?;

        let mut ledger = SessionStore::load_ledger(&rocks)?;
        let account = self.contract_account()?;
        if ledger.create_account(&account) {
            tracing::debug!(account = %account, "Registered contract account in local ledger");
        }

        let now = self.now.unwrap_or_else(|| SystemClock.now());
        tracing::debug!(data_dir = %data_dir.display(), now = %now, "Opened session");
        let ledger = SharedLedger::new(ledger);
        let store = SessionStore::new(rocks, ledger.clone());
        Ok(TimelyReward::new(account, store, ledger, ManualClock::new(now)))
    }
}

/// Persist the ledger held by `contract` for runs that commit no table write.
pub fn save(contract: &Contract) -> Result<(), CliError> {
    Ok(contract.store().save_ledger()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::actions::{self, AddRewardCmd, ClaimCmd, SetTokenCmd};
    use timely_core::asset::{Asset, Symbol};
    use timely_core::traits::StateStore;
    use uuid::Uuid;

    fn name(s: &str) -> AccountName {
        AccountName::new(s).unwrap()
    }

    fn btc(s: &str) -> Asset {
        s.parse().unwrap()
    }

    /// Context rooted at a fresh temporary data directory.
    fn context(data_dir: &str, now: &str) -> Context {
        Context {
            config: CliConfig {
                data_dir: data_dir.to_string(),
                ..CliConfig::default()
            },
            auth: None,
            now: Some(now.parse().unwrap()),
            format: OutputFormat::Json,
        }
    }

    fn temp_data_dir() -> String {
        let path = std::env::temp_dir().join(format!("timely_cli_test_{}", Uuid::now_v7()));
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_claim_persists_row_and_transfer_together() {
        let dir = temp_data_dir();
        let setup = context(&dir, "2022-01-01T00:00:00");

        {
            let contract = setup.open().unwrap();
            {
                let mut ledger = contract.ledger().write();
                ledger.create_account(&name("test.token"));
                ledger.create_account(&name("alice"));
                ledger
                    .create_token(&name("test.token"), &name("test.token"), &btc("21000000.00000000 BTC"))
                    .unwrap();
                ledger
                    .issue(&name("test.token"), &name("timelyreward"), &btc("10000.00000000 BTC"))
                    .unwrap();
            }
            save(&contract).unwrap();
        }
        actions::settoken(
            &setup,
            &SetTokenCmd {
                contract: name("test.token"),
                symbol: "8,BTC".parse().unwrap(),
            },
        )
        .unwrap();
        actions::addreward(
            &setup,
            &AddRewardCmd {
                recipients: vec![name("alice")],
                quantity: btc("1000.00000000 BTC"),
                unlock_start: "2022-01-02T00:00:00".parse().unwrap(),
                unlock_days: 7,
            },
        )
        .unwrap();

        let later = context(&dir, "2022-01-02T10:00:00");
        actions::claim(&later, &ClaimCmd { user: name("alice") }).unwrap();

        // nothing was saved explicitly after the claim
        let reopened = later.open().unwrap();
        let row = reopened.store().reward(&name("alice")).unwrap().unwrap();
        assert_eq!(row.remaining_rewards, btc("940.47619048 BTC"));
        let symbol: Symbol = "8,BTC".parse().unwrap();
        let ledger = reopened.ledger().read();
        assert_eq!(
            ledger.balance(&name("test.token"), &name("alice"), &symbol),
            btc("59.52380952 BTC")
        );
        assert_eq!(
            ledger.balance(&name("test.token"), &name("timelyreward"), &symbol),
            btc("9940.47619048 BTC")
        );
        drop(ledger);
        drop(reopened);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_rejected_claim_persists_nothing() {
        let dir = temp_data_dir();
        let setup = context(&dir, "2022-01-01T00:00:00");
        {
            let contract = setup.open().unwrap();
            {
                let mut ledger = contract.ledger().write();
                ledger.create_account(&name("test.token"));
                ledger.create_account(&name("alice"));
                ledger
                    .create_token(&name("test.token"), &name("test.token"), &btc("21000000.00000000 BTC"))
                    .unwrap();
                ledger
                    .issue(&name("test.token"), &name("timelyreward"), &btc("1.00000000 BTC"))
                    .unwrap();
            }
            save(&contract).unwrap();
        }
        actions::settoken(
            &setup,
            &SetTokenCmd {
                contract: name("test.token"),
                symbol: "8,BTC".parse().unwrap(),
            },
        )
        .unwrap();
        actions::addreward(
            &setup,
            &AddRewardCmd {
                recipients: vec![name("alice")],
                quantity: btc("1000.00000000 BTC"),
                unlock_start: "2022-01-02T00:00:00".parse().unwrap(),
                unlock_days: 7,
            },
        )
        .unwrap();

        let later = context(&dir, "2022-01-03T00:00:00");
        assert!(actions::claim(&later, &ClaimCmd { user: name("alice") }).is_err());

        let reopened = later.open().unwrap();
        let row = reopened.store().reward(&name("alice")).unwrap().unwrap();
        assert_eq!(row.remaining_rewards, btc("1000.00000000 BTC"));
        let symbol: Symbol = "8,BTC".parse().unwrap();
        assert!(reopened
            .ledger()
            .read()
            .balance(&name("test.token"), &name("alice"), &symbol)
            .is_zero());
        drop(reopened);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
