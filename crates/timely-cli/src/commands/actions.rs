// crates/timely-cli/src/commands/actions.rs
//
// The four contract actions: `setpaused`, `settoken`, `addreward`, `claim`.
//
// Each action commits its table writes and the ledger snapshot in one batch.
// Administrative actions default to the contract account's authority;
// `claim` defaults to the claiming user's. `--auth` overrides either, which
// is how a rejected authorization can be exercised from the shell.

use clap::Args;

use timely_core::asset::{Asset, Symbol};
use timely_core::name::AccountName;
use timely_core::time::TimePointSec;

use super::{CliError, Context};
use crate::output::{self, SettlementRow};

/// Pause or resume issuance and claims.
#[derive(Debug, Args)]
pub struct SetPausedCmd {
    /// `true` to pause, `false` to resume.
    #[arg(action = clap::ArgAction::Set)]
    pub paused: bool,
}

/// Point the contract at a different reward token.
#[derive(Debug, Args)]
pub struct SetTokenCmd {
    /// Account of the token contract, e.g. `eosio.token`.
    pub contract: AccountName,

    /// Token symbol as `precision,CODE`, e.g. `8,WAX`.
    pub symbol: Symbol,
}

/// Grant the same vesting schedule to one or more recipients.
#[derive(Debug, Args)]
pub struct AddRewardCmd {
    /// Comma-separated recipient accounts.
    #[arg(long, value_delimiter = ',', required = true)]
    pub recipients: Vec<AccountName>,

    /// Total per recipient, e.g. "1000.00000000 WAX".
    #[arg(long)]
    pub quantity: Asset,

    /// Instant accrual begins, e.g. 2022-01-02T00:00:00 (UTC).
    #[arg(long)]
    pub unlock_start: TimePointSec,

    /// Vesting period in days.
    #[arg(long)]
    pub unlock_days: u16,
}

/// Settle everything a user has accrued so far.
#[derive(Debug, Args)]
pub struct ClaimCmd {
    /// The claiming user.
    pub user: AccountName,
}

/// Run `setpaused`.
pub fn setpaused(ctx: &Context, cmd: &SetPausedCmd) -> Result<(), CliError> {
    let mut contract = ctx.open()?;
    let auth = ctx.auth_or(contract.account());
    contract.setpaused(&auth, cmd.paused)?;

    println!("Contract {}.", if cmd.paused { "paused" } else { "resumed" });
    Ok(())
}

/// Run `settoken`.
pub fn settoken(ctx: &Context, cmd: &SetTokenCmd) -> Result<(), CliError> {
    let mut contract = ctx.open()?;
    let auth = ctx.auth_or(contract.account());
    contract.settoken(&auth, &cmd.contract, &cmd.symbol)?;

    println!("Reward token set to {} on {}.", cmd.symbol, cmd.contract);
    Ok(())
}

/// Run `addreward`.
pub fn addreward(ctx: &Context, cmd: &AddRewardCmd) -> Result<(), CliError> {
    let mut contract = ctx.open()?;
    let auth = ctx.auth_or(contract.account());
    contract.addreward(
        &auth,
        &cmd.recipients,
        &cmd.quantity,
        cmd.unlock_start,
        cmd.unlock_days,
    )?;

    println!(
        "Granted {} to {} recipient(s), unlocking from {} over {} day(s).",
        cmd.quantity,
        cmd.recipients.len(),
        cmd.unlock_start,
        cmd.unlock_days
    );
    Ok(())
}

/// Run `claim`.
pub fn claim(ctx: &Context, cmd: &ClaimCmd) -> Result<(), CliError> {
    let mut contract = ctx.open()?;
    let auth = ctx.auth_or(&cmd.user);
    let settlement = contract.claim(&auth, &cmd.user)?;

    output::emit(ctx.format, &settlement, &[SettlementRow::from(&settlement)]);
    Ok(())
}
