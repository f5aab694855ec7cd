// crates/timely-rewards/tests/vesting_properties.rs
//
// Invariants of the vesting lifecycle, checked over a spread of grant sizes,
// periods, and claim cadences:
//   - conservation: settled so far + remaining == granted, at every step
//   - remaining never increases; last_claim never decreases and never
//     precedes unlock_start
//   - claiming twice at the same instant settles nothing the second time
//   - exhaustion deletes the row
//   - duplicate grants never touch the existing row

use timely_core::{AccountName, Asset, ManualClock, Symbol, TimePointSec, TimelyError};
use timely_rewards::{MemoryLedger, TimelyReward};
use timely_store::MemoryStore;

type Contract = TimelyReward<MemoryStore, MemoryLedger, ManualClock>;

const START: u32 = 1_641_081_600; // 2022-01-02T00:00:00

fn name(s: &str) -> AccountName {
    AccountName::new(s).unwrap()
}

fn symbol() -> Symbol {
    "8,WAX".parse().unwrap()
}

fn wax(amount: i64) -> Asset {
    Asset::new(amount, symbol())
}

/// Default config (8,WAX on eosio.token), contract funded generously.
fn setup() -> Contract {
    let admin = name("timelyreward");
    let mut ledger = MemoryLedger::new();
    for a in ["timelyreward", "eosio.token", "alice", "bob"] {
        ledger.create_account(&name(a));
    }
    ledger
        .create_token(&name("eosio.token"), &name("eosio.token"), &wax(1 << 61))
        .unwrap();
    ledger
        .issue(&name("eosio.token"), &admin, &wax(1 << 60))
        .unwrap();
    TimelyReward::new(
        admin,
        MemoryStore::new(),
        ledger,
        ManualClock::new(TimePointSec::from_secs(START - 86_400)),
    )
}

fn grant(c: &mut Contract, user: &str, amount: i64, days: u16) {
    let admin = c.account().clone();
    c.addreward(&admin, &[name(user)], &wax(amount), TimePointSec::from_secs(START), days)
        .unwrap();
}

/// Claim every `step` seconds from unlock until the schedule is exhausted,
/// checking the invariants after each claim. Returns the number of claims.
fn run_to_exhaustion(amount: i64, days: u16, step: u32) -> usize {
    let mut c = setup();
    let alice = name("alice");
    grant(&mut c, "alice", amount, days);

    let mut settled_total: i64 = 0;
    let mut last_remaining = amount;
    let mut last_claim = TimePointSec::from_secs(START);
    let mut now = START;
    let mut claims = 0;

    loop {
        now += step;
        c.clock().set(TimePointSec::from_secs(now));
        let s = c.claim(&alice, &alice).unwrap();
        claims += 1;
        settled_total += s.settled.amount;

        assert_eq!(settled_total + s.remaining_rewards.amount, amount, "conservation");
        assert!(s.remaining_rewards.amount <= last_remaining, "monotonic balance");
        assert!(s.remaining_rewards.amount >= 0);
        assert!(s.last_claim >= last_claim, "last_claim monotonic");
        assert!(s.last_claim >= TimePointSec::from_secs(START));
        last_remaining = s.remaining_rewards.amount;
        last_claim = s.last_claim;

        if s.exhausted {
            assert!(c.reward(&alice).unwrap().is_none());
            break;
        }
        let row = c.reward(&alice).unwrap().unwrap();
        assert_eq!(row.remaining_rewards, s.remaining_rewards);
        assert!(row.daily_rate.amount >= 0);
        assert!(row.daily_rate.is_same_denomination(&row.remaining_rewards));
        assert!(claims < 100_000, "schedule never exhausted");
    }

    let symbol = symbol();
    assert_eq!(
        c.ledger().balance(&name("eosio.token"), &alice, &symbol),
        wax(amount)
    );
    claims
}

#[test]
fn test_conservation_across_cadences() {
    let grants: [(i64, u16); 5] = [
        (100_000_000_000, 7),
        (1_000, 3),
        (99_999_999_999, 365),
        (70, 2),
        (4_611_686_018_427_387_903 / 4, 30),
    ];
    let steps = [3_600, 36_000, 86_400, 7 * 86_400];
    for (amount, days) in grants {
        for step in steps {
            run_to_exhaustion(amount, days, step);
        }
    }
}

#[test]
fn test_single_late_claim_pays_everything() {
    assert_eq!(run_to_exhaustion(100_000_000_000, 7, 30 * 86_400), 1);
}

#[test]
fn test_second_claim_at_same_instant_settles_nothing() {
    let mut c = setup();
    let alice = name("alice");
    grant(&mut c, "alice", 100_000_000_000, 7);
    c.clock().set(TimePointSec::from_secs(START + 12_345));

    let first = c.claim(&alice, &alice).unwrap();
    assert!(!first.settled.is_zero());
    let second = c.claim(&alice, &alice).unwrap();
    assert!(second.settled.is_zero());
    assert_eq!(second.remaining_rewards, first.remaining_rewards);
    assert_eq!(second.last_claim, first.last_claim);
}

#[test]
fn test_zero_accrual_claim_records_progress() {
    let mut c = setup();
    let alice = name("alice");
    // 1 minor unit per day: nothing accrues within the first day
    grant(&mut c, "alice", 7, 7);
    c.clock().set(TimePointSec::from_secs(START + 3_600));

    let s = c.claim(&alice, &alice).unwrap();
    assert!(s.settled.is_zero());
    assert_eq!(s.remaining_rewards, wax(7));
    let row = c.reward(&alice).unwrap().unwrap();
    assert_eq!(row.last_claim, TimePointSec::from_secs(START + 3_600));
}

#[test]
fn test_locked_claims_never_mutate() {
    let mut c = setup();
    let alice = name("alice");
    grant(&mut c, "alice", 5_000, 5);
    let before = c.reward(&alice).unwrap();

    for offset in [86_400, 3_600, 1] {
        c.clock().set(TimePointSec::from_secs(START - offset));
        assert_eq!(
            c.claim(&alice, &alice).unwrap_err(),
            TimelyError::NotYetUnlocked(alice.clone())
        );
    }
    assert_eq!(c.reward(&alice).unwrap(), before);
}

#[test]
fn test_duplicate_grant_leaves_existing_row() {
    let mut c = setup();
    let alice = name("alice");
    grant(&mut c, "alice", 5_000, 5);
    c.clock().set(TimePointSec::from_secs(START + 86_400));
    c.claim(&alice, &alice).unwrap();
    let before = c.reward(&alice).unwrap();

    let admin = c.account().clone();
    let err = c
        .addreward(&admin, &[alice.clone()], &wax(1), TimePointSec::from_secs(START + 10 * 86_400), 1)
        .unwrap_err();
    assert_eq!(err, TimelyError::DuplicateRecipient(alice.clone()));
    assert_eq!(c.reward(&alice).unwrap(), before);
}

#[test]
fn test_quantity_range_scenarios() {
    let mut c = setup();
    let admin = c.account().clone();
    let start = TimePointSec::from_secs(START);

    let too_big: Asset = "46116860200.00000000 WAX".parse().unwrap();
    let err = c.addreward(&admin, &[name("bob")], &too_big, start, 7).unwrap_err();
    assert_eq!(err.to_string(), "invalid quantity");

    let negative: Asset = "-10.00000000 WAX".parse().unwrap();
    let err = c.addreward(&admin, &[name("bob")], &negative, start, 7).unwrap_err();
    assert_eq!(err.to_string(), "quantity amount must be positive");

    assert!(c.rewards().unwrap().is_empty());
}

#[test]
fn test_grants_are_independent() {
    let mut c = setup();
    let admin = c.account().clone();
    c.addreward(
        &admin,
        &[name("alice"), name("bob")],
        &wax(700),
        TimePointSec::from_secs(START),
        7,
    )
    .unwrap();

    c.clock().set(TimePointSec::from_secs(START + 86_400));
    let alice = name("alice");
    assert_eq!(c.claim(&alice, &alice).unwrap().settled, wax(100));

    c.clock().set(TimePointSec::from_secs(START + 3 * 86_400));
    let bob = name("bob");
    assert_eq!(c.claim(&bob, &bob).unwrap().settled, wax(300));
    assert_eq!(c.reward(&alice).unwrap().unwrap().remaining_rewards, wax(600));
}
