// crates/timely-rewards/src/lib.rs
//
// timely-rewards: the Timely Reward vesting contract.
//
// An administrator (the contract account) grants recipients a fixed quantity
// of the configured reward token that unlocks linearly, day by day, from a
// future instant. Recipients claim whatever has accrued since their previous
// claim; the schedule row is deleted once it is fully paid out.
//
// All amounts are integer minor units of the token (see `timely_core::Asset`).

pub mod claim;
pub mod config;
pub mod contract;
pub mod issuance;
pub mod ledger;

// Re-export key types for ergonomic access from downstream crates.
pub use claim::Settlement;
pub use contract::{ClaimQuote, TimelyReward, CLAIM_MEMO};
pub use ledger::{LedgerError, MemoryLedger, TokenStat};
