// crates/timely-cli/src/commands/tables.rs
//
// Read-only inspection: the effective config, the rewards table, and the
// accrual preview for one user. Nothing here needs authorization.

use clap::Args;

use timely_core::name::AccountName;

use super::{CliError, Context};
use crate::output::{self, ConfigRow, QuoteRow, RewardRow};

/// List reward schedules.
#[derive(Debug, Args)]
pub struct RewardsCmd {
    /// Show only this user's schedule.
    #[arg(long)]
    pub user: Option<AccountName>,
}

/// Preview what a claim would settle.
#[derive(Debug, Args)]
pub struct PendingCmd {
    pub user: AccountName,
}

/// Run `config`.
pub fn config(ctx: &Context) -> Result<(), CliError> {
    let contract = ctx.open()?;
    let config = contract.config()?;
    output::emit(ctx.format, &config, &[ConfigRow::from(&config)]);
    Ok(())
}

/// Run `rewards`.
pub fn rewards(ctx: &Context, cmd: &RewardsCmd) -> Result<(), CliError> {
    let contract = ctx.open()?;
    let schedules = match &cmd.user {
        Some(user) => contract.reward(user)?.into_iter().collect(),
        None => contract.rewards()?,
    };

    if schedules.is_empty() && ctx.format == output::OutputFormat::Table {
        println!("No reward schedules.");
        return Ok(());
    }
    let rows: Vec<RewardRow> = schedules.iter().map(RewardRow::from).collect();
    output::emit(ctx.format, &schedules, &rows);
    Ok(())
}

/// Run `pending`.
pub fn pending(ctx: &Context, cmd: &PendingCmd) -> Result<(), CliError> {
    let contract = ctx.open()?;
    let quote = contract.pending(&cmd.user)?;
    output::emit(ctx.format, &quote, &[QuoteRow::from(&quote)]);
    Ok(())
}
