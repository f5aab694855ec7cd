// crates/timely-core/src/lib.rs
//
// timely-core: Core types, records, errors, and collaborator traits for the
// Timely Reward vesting engine.
//
// This is the leaf crate that every other crate in the workspace depends on.
// Token amounts are integer minor units tagged with a symbol; no floating
// point is used anywhere in the accounting.

pub mod asset;
pub mod error;
pub mod name;
pub mod records;
pub mod time;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use timely_core::Asset;`
pub use asset::{Asset, Symbol, SymbolCode, MAX_AMOUNT};
pub use error::{ErrorKind, TimelyError};
pub use name::AccountName;
pub use records::{GlobalConfig, RewardSchedule};
pub use time::{ManualClock, SystemClock, TimePointSec, SECONDS_PER_DAY};
pub use traits::{Clock, StateStore, StateWrite, TokenLedger};
