// crates/timely-cli/src/output.rs
//
// Output formatting for the Timely CLI.
// Supports table and JSON output modes.

use serde::Serialize;
use tabled::{Table, Tabled};

use timely_core::records::{GlobalConfig, RewardSchedule};
use timely_rewards::{ClaimQuote, Settlement};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Print `value` as JSON, or its table rows otherwise.
pub fn emit<V: Serialize, T: Tabled>(format: OutputFormat, value: &V, rows: &[T]) {
    match format {
        OutputFormat::Json => println!("{}", format_json(value)),
        OutputFormat::Table => println!("{}", format_table(rows)),
    }
}

#[derive(Debug, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Paused")]
    pub paused: bool,
    #[tabled(rename = "Token Contract")]
    pub token_contract: String,
    #[tabled(rename = "Token Symbol")]
    pub token_symbol: String,
}

impl From<&GlobalConfig> for ConfigRow {
    fn from(c: &GlobalConfig) -> Self {
        Self {
            paused: c.paused,
            token_contract: c.token_contract.to_string(),
            token_symbol: c.token_symbol.to_string(),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct RewardRow {
    #[tabled(rename = "User")]
    pub user: String,
    #[tabled(rename = "Remaining")]
    pub remaining_rewards: String,
    #[tabled(rename = "Unlock Start")]
    pub unlock_start: String,
    #[tabled(rename = "Daily Rate")]
    pub daily_rate: String,
    #[tabled(rename = "Last Claim")]
    pub last_claim: String,
}

impl From<&RewardSchedule> for RewardRow {
    fn from(r: &RewardSchedule) -> Self {
        Self {
            user: r.user.to_string(),
            remaining_rewards: r.remaining_rewards.to_string(),
            unlock_start: r.unlock_start.to_string(),
            daily_rate: r.daily_rate.to_string(),
            last_claim: r.last_claim.to_string(),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct QuoteRow {
    #[tabled(rename = "User")]
    pub user: String,
    #[tabled(rename = "At")]
    pub at: String,
    #[tabled(rename = "Unlocked")]
    pub unlocked: bool,
    #[tabled(rename = "Claimable")]
    pub claimable: String,
    #[tabled(rename = "Remaining")]
    pub remaining_rewards: String,
}

impl From<&ClaimQuote> for QuoteRow {
    fn from(q: &ClaimQuote) -> Self {
        Self {
            user: q.user.to_string(),
            at: q.at.to_string(),
            unlocked: q.unlocked,
            claimable: q.claimable.to_string(),
            remaining_rewards: q.remaining_rewards.to_string(),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct SettlementRow {
    #[tabled(rename = "User")]
    pub user: String,
    #[tabled(rename = "Settled")]
    pub settled: String,
    #[tabled(rename = "Remaining")]
    pub remaining_rewards: String,
    #[tabled(rename = "Last Claim")]
    pub last_claim: String,
    #[tabled(rename = "Exhausted")]
    pub exhausted: bool,
}

impl From<&Settlement> for SettlementRow {
    fn from(s: &Settlement) -> Self {
        Self {
            user: s.user.to_string(),
            settled: s.settled.to_string(),
            remaining_rewards: s.remaining_rewards.to_string(),
            last_claim: s.last_claim.to_string(),
            exhausted: s.exhausted,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct BalanceRow {
    #[tabled(rename = "Contract")]
    pub contract: String,
    #[tabled(rename = "Owner")]
    pub owner: String,
    #[tabled(rename = "Balance")]
    pub balance: String,
}
