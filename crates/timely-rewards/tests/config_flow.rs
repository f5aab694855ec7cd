// crates/timely-rewards/tests/config_flow.rs
//
// Configuration actions as an external inspector sees them: the config table
// is empty until the first administrative write, then holds exactly one row.

use serde_json::{json, Value};

use timely_core::traits::StateStore;
use timely_core::{AccountName, ManualClock, TimePointSec, TimelyError};
use timely_rewards::{MemoryLedger, TimelyReward};
use timely_store::MemoryStore;

type Contract = TimelyReward<MemoryStore, MemoryLedger, ManualClock>;

fn name(s: &str) -> AccountName {
    AccountName::new(s).unwrap()
}

fn admin() -> AccountName {
    name("ezstake")
}

fn setup() -> Contract {
    let mut ledger = MemoryLedger::new();
    for a in ["ezstake", "eosio.token", "test.token", "alice", "bob"] {
        ledger.create_account(&name(a));
    }
    ledger
        .create_token(
            &name("test.token"),
            &name("test.token"),
            &"21000000.00000000 BTC".parse().unwrap(),
        )
        .unwrap();
    TimelyReward::new(
        admin(),
        MemoryStore::new(),
        ledger,
        ManualClock::new(TimePointSec::from_secs(0)),
    )
}

fn config_rows(c: &Contract) -> Vec<Value> {
    c.store()
        .config()
        .unwrap()
        .into_iter()
        .map(|row| serde_json::to_value(row).unwrap())
        .collect()
}

fn default_row() -> Value {
    json!({ "paused": false, "token_contract": "eosio.token", "token_symbol": "8,WAX" })
}

#[test]
fn test_pause_requires_contract_auth() {
    let mut c = setup();
    let err = c.setpaused(&name("alice"), true).unwrap_err();
    assert_eq!(err.to_string(), "this action is restricted to admin only");
    assert!(config_rows(&c).is_empty());
}

#[test]
fn test_pause_and_unpause() {
    let mut c = setup();
    c.setpaused(&admin(), true).unwrap();
    let mut paused = default_row();
    paused["paused"] = json!(true);
    assert_eq!(config_rows(&c), vec![paused]);

    c.setpaused(&admin(), false).unwrap();
    assert_eq!(config_rows(&c), vec![default_row()]);
}

#[test]
fn test_set_token() {
    let mut c = setup();
    c.setpaused(&admin(), false).unwrap();

    let err = c
        .settoken(&name("alice"), &name("eosio.token"), &"8,WAX".parse().unwrap())
        .unwrap_err();
    assert_eq!(err.to_string(), "this action is restricted to admin only");
    assert_eq!(config_rows(&c), vec![default_row()]);

    c.settoken(&admin(), &name("test.token"), &"8,BTC".parse().unwrap())
        .unwrap();
    assert_eq!(
        config_rows(&c),
        vec![json!({ "paused": false, "token_contract": "test.token", "token_symbol": "8,BTC" })]
    );
}

#[test]
fn test_set_token_rejections() {
    let mut c = setup();
    let cases = [
        ("dummy", "8,WAX", "contract account does not exist"),
        ("alice", "8,WAX", "token symbol does not exist"),
        ("test.token", "4,EOS", "token symbol does not exist"),
    ];
    for (contract, symbol, message) in cases {
        let err = c
            .settoken(&admin(), &name(contract), &symbol.parse().unwrap())
            .unwrap_err();
        assert_eq!(err.to_string(), message);
    }
    assert!(config_rows(&c).is_empty());
}

#[test]
fn test_settoken_then_pause_keeps_token() {
    let mut c = setup();
    c.settoken(&admin(), &name("test.token"), &"8,BTC".parse().unwrap())
        .unwrap();
    c.setpaused(&admin(), true).unwrap();
    assert_eq!(
        config_rows(&c),
        vec![json!({ "paused": true, "token_contract": "test.token", "token_symbol": "8,BTC" })]
    );
    assert!(c.config().unwrap().paused);
    assert!(matches!(
        c.claim(&name("alice"), &name("alice")),
        Err(TimelyError::ContractPaused)
    ));
}

#[test]
fn test_set_token_matches_stat_row_by_code() {
    // the stat row on test.token is 8,BTC; a 4,BTC symbol shares its code
    let mut c = setup();
    c.settoken(&admin(), &name("test.token"), &"4,BTC".parse().unwrap())
        .unwrap();
    assert_eq!(
        config_rows(&c),
        vec![json!({ "paused": false, "token_contract": "test.token", "token_symbol": "4,BTC" })]
    );
}
